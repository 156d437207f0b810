//! Sort specifications produced by `OrderBy` clauses.

use std::fmt;
use std::str::FromStr;

use mapline_foundation::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl Direction {
    /// Returns true for ascending order.
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }

    /// Returns true for descending order.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Desc)
    }

    /// Parses an optional direction, treating unknown input as absent.
    #[must_use]
    pub fn from_optional_str(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(Error::invalid_argument(format!(
                "invalid sort direction '{s}'; expected 'asc' or 'desc' (case insensitive)"
            )))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

/// Placement of null values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NullHandling {
    /// Leave it to the store.
    #[default]
    Native,
    /// Nulls before non-null values.
    NullsFirst,
    /// Nulls after non-null values.
    NullsLast,
}

/// Ordering on a single property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    property: String,
    direction: Direction,
    ignore_case: bool,
    null_handling: NullHandling,
}

impl Order {
    /// Orders by `property` in the given direction.
    #[must_use]
    pub fn new(direction: Direction, property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction,
            ignore_case: false,
            null_handling: NullHandling::Native,
        }
    }

    /// Ascending order on `property`.
    #[must_use]
    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(Direction::Asc, property)
    }

    /// Descending order on `property`.
    #[must_use]
    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(Direction::Desc, property)
    }

    /// The ordered property's dotted path.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true for ascending order.
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }

    /// Returns true for descending order.
    #[must_use]
    pub const fn is_descending(&self) -> bool {
        self.direction.is_descending()
    }

    /// Returns true if values compare case-insensitively.
    #[must_use]
    pub const fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Null placement.
    #[must_use]
    pub const fn null_handling(&self) -> NullHandling {
        self.null_handling
    }

    /// Copy with a different direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Copy that compares case-insensitively.
    #[must_use]
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Copy with a different null placement.
    #[must_use]
    pub fn with_null_handling(mut self, null_handling: NullHandling) -> Self {
        self.null_handling = null_handling;
        self
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.direction)?;
        if self.ignore_case {
            f.write_str(", ignoring case")?;
        }
        Ok(())
    }
}

/// An ordered list of [`Order`]s. Empty means unsorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// A sort with no orders.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self { orders: Vec::new() }
    }

    /// Ascending sort on each property in turn.
    #[must_use]
    pub fn by<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::by_orders(properties.into_iter().map(Order::asc))
    }

    /// Sort from explicit orders.
    #[must_use]
    pub fn by_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: orders.into_iter().collect(),
        }
    }

    /// This sort followed by `other`.
    #[must_use]
    pub fn and(mut self, other: Self) -> Self {
        self.orders.extend(other.orders);
        self
    }

    /// Copy with every order ascending.
    #[must_use]
    pub fn ascending(self) -> Self {
        self.with_direction(Direction::Asc)
    }

    /// Copy with every order descending.
    #[must_use]
    pub fn descending(self) -> Self {
        self.with_direction(Direction::Desc)
    }

    fn with_direction(self, direction: Direction) -> Self {
        Self::by_orders(self.orders.into_iter().map(|o| o.with_direction(direction)))
    }

    /// Returns true if at least one order is present.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        !self.orders.is_empty()
    }

    /// Returns true if no order is present.
    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// The order for `property`, if any.
    #[must_use]
    pub fn order_for(&self, property: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.property == property)
    }

    /// Iterates over the orders.
    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    /// Number of orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if unsorted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.orders.is_empty() {
            return f.write_str("UNSORTED");
        }
        for (i, order) in self.orders.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{order}")?;
        }
        Ok(())
    }
}
