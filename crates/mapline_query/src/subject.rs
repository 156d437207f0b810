//! The subject clause of a method name: everything up to the first `By`.

use once_cell::sync::Lazy;
use regex::Regex;

use mapline_foundation::{Error, Result};

static PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(find|read|get|query|search|stream|count|exists|delete|remove)((\p{Lu}.*?))??By")
        .expect("valid subject prefix pattern")
});

static COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^count(\p{Lu}.*?)??By").expect("valid count pattern"));

static EXISTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(exists)(\p{Lu}.*?)??By").expect("valid exists pattern"));

static DELETE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(delete|remove)(\p{Lu}.*?)??By").expect("valid delete pattern"));

static LIMITING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(find|read|get|query|search|stream)(Distinct)?(First|Top)(\d*)?(\p{Lu}.*?)??By")
        .expect("valid limiting pattern")
});

const DISTINCT: &str = "Distinct";

/// Projection flags and result limit read from the subject.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subject {
    source: Option<String>,
    distinct: bool,
    count: bool,
    exists: bool,
    delete: bool,
    max_results: Option<usize>,
}

impl Subject {
    /// Splits `method` into its subject and the remaining predicate.
    ///
    /// A method without a recognized prefix has no subject; the whole name
    /// is the predicate.
    ///
    /// # Errors
    ///
    /// Returns `QuerySyntax` if a `First`/`Top` limit does not fit in `usize`.
    pub fn split(method: &str) -> Result<(Self, &str)> {
        match PREFIX.find(method) {
            Some(prefix) => {
                let subject = Self::parse(prefix.as_str())?;
                Ok((subject, &method[prefix.end()..]))
            }
            None => Ok((Self::default(), method)),
        }
    }

    fn parse(subject: &str) -> Result<Self> {
        Ok(Self {
            source: Some(subject.to_string()),
            distinct: subject.contains(DISTINCT),
            count: COUNT.is_match(subject),
            exists: EXISTS.is_match(subject),
            delete: DELETE.is_match(subject),
            max_results: Self::max_results_of(subject)?,
        })
    }

    fn max_results_of(subject: &str) -> Result<Option<usize>> {
        let Some(captures) = LIMITING.captures(subject) else {
            return Ok(None);
        };
        match captures.get(4).map(|m| m.as_str()).filter(|d| !d.is_empty()) {
            Some(digits) => digits.parse().map(Some).map_err(|_| {
                Error::query_syntax(
                    "subject",
                    format!("result limit {digits} is out of range"),
                )
            }),
            None => Ok(Some(1)),
        }
    }

    /// The matched subject text including the trailing `By`.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns true if duplicates should be removed.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Returns true for a `count…By` projection.
    #[must_use]
    pub const fn is_count_projection(&self) -> bool {
        self.count
    }

    /// Returns true for an `exists…By` projection.
    #[must_use]
    pub const fn is_exists_projection(&self) -> bool {
        self.exists
    }

    /// Returns true for `delete…By` or `remove…By`.
    #[must_use]
    pub const fn is_delete(&self) -> bool {
        self.delete
    }

    /// Returns true if a `First`/`Top` limit is present.
    #[must_use]
    pub const fn is_limiting(&self) -> bool {
        self.max_results.is_some()
    }

    /// The `First`/`Top` limit.
    #[must_use]
    pub const fn max_results(&self) -> Option<usize> {
        self.max_results
    }
}
