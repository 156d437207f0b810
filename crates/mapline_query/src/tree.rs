//! Derivation of a query description from a repository method name.
//!
//! `findDistinctTop3ByLastnameAndAgeGreaterThanOrEmailOrderByLastnameDesc`
//! breaks into a subject (`findDistinctTop3By`), a predicate of `Or`-joined
//! groups of `And`-joined parts, and an order clause.
//!
//! With split validation on, a property whose name contains `Or` or `And`
//! (`sizeOrWeight`) survives: when a segment of the maximal split does not
//! resolve, adjacent segments are re-joined with the keyword and tried as
//! one.

use std::collections::HashMap;
use std::fmt;

use mapline_foundation::{Error, ErrorContext, ErrorKind, Result, TypeName};
use mapline_path::PathResolver;
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::keyword::PartType;
use crate::order_by;
use crate::part::{OrPart, Part};
use crate::sort::Sort;
use crate::subject::Subject;
use crate::tokenizer;

const OR: &str = "Or";
const AND: &str = "And";
const ORDER_BY: &str = "OrderBy";

/// A parsed repository method name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartTree {
    source: String,
    domain: TypeName,
    subject: Subject,
    nodes: Vec<OrPart>,
    sort: Sort,
    always_ignore_case: bool,
}

impl PartTree {
    /// Parses `method` against the entity `domain` with the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// See [`with_config`](Self::with_config).
    pub fn new(method: &str, domain: &TypeName, resolver: &PathResolver) -> Result<Self> {
        Self::with_config(method, domain, resolver, &ParserConfig::default())
    }

    /// Parses `method` against the entity `domain`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for an empty name, `SourceTooLong` past the limit
    /// - `QuerySyntax` for a repeated or dangling `OrderBy`, a bare direction
    ///   keyword, or a keyword with no property
    /// - resolution errors for unknown properties
    /// - `KeywordMismatch` in strict geospatial mode
    ///
    /// Every error carries the method name as its source and, where one
    /// applies, the offending segment.
    pub fn with_config(
        method: &str,
        domain: &TypeName,
        resolver: &PathResolver,
        config: &ParserConfig,
    ) -> Result<Self> {
        if method.trim().is_empty() {
            return Err(Error::invalid_argument("method name must not be empty"));
        }
        if method.len() > config.max_method_name_length {
            return Err(Error::new(ErrorKind::SourceTooLong {
                limit: config.max_method_name_length,
                length: method.len(),
            }));
        }

        Self::parse(method, domain, resolver, config)
            .map_err(|e| e.with_context(ErrorContext::new().with_source(method)))
    }

    fn parse(
        method: &str,
        domain: &TypeName,
        resolver: &PathResolver,
        config: &ParserConfig,
    ) -> Result<Self> {
        let (subject, predicate) = Subject::split(method)?;
        let (predicate, always_ignore_case) = tokenizer::strip_all_ignore_case(predicate);

        if predicate.ends_with(ORDER_BY) {
            return Err(Error::query_syntax(
                ORDER_BY,
                "OrderBy must be followed by a property",
            ));
        }
        let clauses = tokenizer::split_on_keyword(&predicate, ORDER_BY);
        if clauses.len() > 2 {
            return Err(Error::query_syntax(
                ORDER_BY,
                "OrderBy must not be used more than once in a method name",
            ));
        }

        let parser = PredicateParser {
            domain,
            resolver,
            config,
            always_ignore_case,
        };
        let nodes = parser.parse(clauses[0])?;
        let sort = match clauses.get(1) {
            Some(clause) => order_by::parse(clause, domain, resolver)?,
            None => Sort::unsorted(),
        };

        debug!(
            method,
            domain = %domain,
            or_parts = nodes.len(),
            sorted = sort.is_sorted(),
            limit = ?subject.max_results(),
            "derived part tree"
        );

        Ok(Self {
            source: method.to_string(),
            domain: domain.clone(),
            subject,
            nodes,
            sort,
            always_ignore_case,
        })
    }

    /// The method name this tree was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The entity the method queries.
    #[must_use]
    pub const fn domain_type(&self) -> &TypeName {
        &self.domain
    }

    /// The subject clause.
    #[must_use]
    pub const fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Iterates over the `Or`-joined groups.
    pub fn iter(&self) -> std::slice::Iter<'_, OrPart> {
        self.nodes.iter()
    }

    /// The order clause, unsorted when absent.
    #[must_use]
    pub const fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Returns true for `…Distinct…By`.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.subject.is_distinct()
    }

    /// Returns true for `count…By`.
    #[must_use]
    pub const fn is_count_projection(&self) -> bool {
        self.subject.is_count_projection()
    }

    /// Returns true for `exists…By`.
    #[must_use]
    pub const fn is_exists_projection(&self) -> bool {
        self.subject.is_exists_projection()
    }

    /// Returns true for `delete…By` and `remove…By`.
    #[must_use]
    pub const fn is_delete(&self) -> bool {
        self.subject.is_delete()
    }

    /// Returns true if a `First`/`Top` limit is present.
    #[must_use]
    pub const fn is_limiting(&self) -> bool {
        self.subject.is_limiting()
    }

    /// The `First`/`Top` limit.
    #[must_use]
    pub const fn max_results(&self) -> Option<usize> {
        self.subject.max_results()
    }

    /// Returns true if `AllIgnoreCase` was present.
    #[must_use]
    pub const fn is_always_ignore_case(&self) -> bool {
        self.always_ignore_case
    }

    /// Every part in source order.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.nodes.iter().flat_map(OrPart::iter)
    }

    /// Parts using the given comparison.
    #[must_use]
    pub fn parts_of(&self, part_type: PartType) -> Vec<&Part> {
        self.parts().filter(|p| p.part_type() == part_type).collect()
    }

    /// Returns true if there is at least one part.
    #[must_use]
    pub fn has_predicate(&self) -> bool {
        self.parts().next().is_some()
    }
}

impl<'a> IntoIterator for &'a PartTree {
    type Item = &'a OrPart;
    type IntoIter = std::slice::Iter<'a, OrPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PartTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{node}")?;
        }
        if self.sort.is_sorted() {
            if !self.nodes.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "order by {}", self.sort)?;
        }
        Ok(())
    }
}

// =============================================================================
// Predicate Splitting
// =============================================================================

struct PredicateParser<'a> {
    domain: &'a TypeName,
    resolver: &'a PathResolver,
    config: &'a ParserConfig,
    always_ignore_case: bool,
}

impl PredicateParser<'_> {
    fn parse(&self, predicate: &str) -> Result<Vec<OrPart>> {
        let segments = non_empty(tokenizer::split_on_keyword(predicate, OR));
        self.partition(&segments, OR, |text| {
            let children = non_empty(tokenizer::split_on_keyword(text, AND));
            self.partition(&children, AND, |part| self.part(part))
                .map(OrPart::new)
        })
    }

    fn part(&self, source: &str) -> Result<Part> {
        Part::parse(
            source,
            self.domain,
            self.resolver,
            self.always_ignore_case,
            self.config,
        )
    }

    /// Groups `segments` into runs re-joined by `keyword` so that every run
    /// parses. Prefers the finest grouping, leftmost runs first. Without a
    /// valid grouping the error of the finest one is returned.
    fn partition<T: Clone>(
        &self,
        segments: &[&str],
        keyword: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<Vec<T>> {
        let singles: Vec<Result<T>> = segments.iter().map(|s| parse(s)).collect();
        if singles.iter().all(Result::is_ok) {
            return singles.into_iter().collect();
        }
        let first_error = singles
            .iter()
            .find_map(|r| r.as_ref().err().cloned())
            .unwrap_or_else(|| Error::invalid_argument("empty predicate"));

        if !self.config.validate_splits {
            return Err(first_error);
        }

        let mut joins = Joins {
            segments,
            keyword,
            max_span: self.config.max_joined_segments.max(1),
            parse: &parse,
            parsed: singles
                .into_iter()
                .enumerate()
                .map(|(i, r)| ((i, 1), r.ok()))
                .collect(),
            tails: HashMap::new(),
        };
        match joins.from(0) {
            Some(values) => {
                trace!(keyword, segments = segments.len(), groups = values.len(), "re-joined split");
                Ok(values)
            }
            None => Err(first_error),
        }
    }
}

/// Memoized search for a grouping of segments where every group parses.
struct Joins<'s, 'p, T, F> {
    segments: &'s [&'s str],
    keyword: &'s str,
    max_span: usize,
    parse: &'p F,
    parsed: HashMap<(usize, usize), Option<T>>,
    tails: HashMap<usize, Option<Vec<T>>>,
}

impl<T, F> Joins<'_, '_, T, F>
where
    T: Clone,
    F: Fn(&str) -> Result<T>,
{
    fn from(&mut self, start: usize) -> Option<Vec<T>> {
        if start == self.segments.len() {
            return Some(Vec::new());
        }
        if let Some(done) = self.tails.get(&start) {
            return done.clone();
        }

        let mut result = None;
        let longest = self.max_span.min(self.segments.len() - start);
        for span in 1..=longest {
            let Some(head) = self.group(start, span) else {
                continue;
            };
            if let Some(rest) = self.from(start + span) {
                let mut values = Vec::with_capacity(rest.len() + 1);
                values.push(head);
                values.extend(rest);
                result = Some(values);
                break;
            }
        }

        self.tails.insert(start, result.clone());
        result
    }

    fn group(&mut self, start: usize, span: usize) -> Option<T> {
        if let Some(done) = self.parsed.get(&(start, span)) {
            return done.clone();
        }
        let text = self.segments[start..start + span].join(self.keyword);
        let value = (self.parse)(&text).ok();
        self.parsed.insert((start, span), value.clone());
        value
    }
}

fn non_empty(pieces: Vec<&str>) -> Vec<&str> {
    pieces.into_iter().filter(|p| !p.trim().is_empty()).collect()
}
