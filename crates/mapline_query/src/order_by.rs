//! Parsing of the `OrderBy` clause into a [`Sort`].

use once_cell::sync::Lazy;
use regex::Regex;

use mapline_foundation::{Error, ErrorContext, Result, TypeName};
use mapline_path::PathResolver;

use crate::sort::{Direction, Order, Sort};
use crate::tokenizer;

static DIRECTION_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(.+?)(Asc|Desc)?$").expect("valid order direction pattern"));

const CLAUSE: &str = "OrderBy";

/// Parses an order clause such as `LastnameDescFirstname` into a [`Sort`]
/// whose properties are the resolved dotted paths.
///
/// # Errors
///
/// - `QuerySyntax` for a block that is only a direction keyword
/// - resolution errors for unknown properties, carrying the block as segment
pub fn parse(clause: &str, domain: &TypeName, resolver: &PathResolver) -> Result<Sort> {
    if clause.trim().is_empty() {
        return Ok(Sort::unsorted());
    }

    let orders = tokenizer::split_order_blocks(clause)
        .into_iter()
        .map(|block| {
            order(block, domain, resolver)
                .map_err(|e| e.with_context(ErrorContext::new().with_segment(block)))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Sort::by_orders(orders))
}

fn order(block: &str, domain: &TypeName, resolver: &PathResolver) -> Result<Order> {
    let invalid = || Error::query_syntax(CLAUSE, format!("Invalid order syntax for part {block}"));

    let captures = DIRECTION_SPLIT.captures(block).ok_or_else(invalid)?;
    let property = captures.get(1).map_or("", |m| m.as_str());
    let direction = captures.get(2).map(|m| m.as_str());

    if direction.is_none() && (property == "Asc" || property == "Desc") {
        return Err(invalid());
    }

    let path = resolver.resolve(property, domain)?;
    let direction = Direction::from_optional_str(direction).unwrap_or_default();
    Ok(Order::new(direction, path.to_dot_path()))
}
