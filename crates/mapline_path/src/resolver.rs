//! Resolution of raw property references against entity metadata.
//!
//! A source such as `userAddressCity` or `user_address.city` is split on
//! explicit delimiters first. Each delimited part is then matched greedily:
//! the whole part is tried as a property name, and on failure the last
//! camel-case word is moved to the pending tail and the shorter head is
//! tried. Once a head resolves, the tail is resolved against the head's
//! actual type. When nothing matches, the failure that got deepest into the
//! path is reported.

use std::sync::Arc;

use mapline_foundation::{
    CacheStats, ComputeCache, Error, ErrorContext, ErrorKind, PropertyReferenceError, Result,
    Type, TypeName,
};
use mapline_mapping::MappingContext;
use tracing::{debug, trace};

use crate::config::ResolverConfig;
use crate::path::PropertyPath;
use crate::persistent::PersistentPropertyPath;
use crate::{splitter, suggest};

/// Longest source echoed in an error frame.
const FRAME_SOURCE_CHARS: usize = 64;

/// One resolved hop before the chain is linked.
#[derive(Debug)]
struct Segment {
    name: String,
    owning_type: TypeName,
    ty: Type,
}

/// Outcome of matching one camel-case head.
#[derive(Debug)]
enum Hop<'s> {
    Matched {
        segment: Segment,
        rest: &'s str,
        first_miss: Option<PropertyReferenceError>,
    },
    Failed(PropertyReferenceError),
}

/// Outcome of resolving a part. Hard failures such as depth limits or
/// mapping errors travel as `Err` instead.
#[derive(Debug)]
enum Resolution {
    Resolved(Vec<Segment>),
    Unresolved(PropertyReferenceError),
}

/// Resolves and caches [`PropertyPath`]s.
///
/// Paths are cached by `(root type, source)` for the life of the resolver;
/// identical inputs return the same `Arc`. Only successful resolutions are
/// cached.
#[derive(Debug)]
pub struct PathResolver {
    context: Arc<MappingContext>,
    config: ResolverConfig,
    paths: ComputeCache<(TypeName, String), Arc<PropertyPath>>,
}

impl PathResolver {
    /// Creates a resolver with the default limits.
    #[must_use]
    pub fn new(context: Arc<MappingContext>) -> Self {
        Self::with_config(context, ResolverConfig::default())
    }

    /// Creates a resolver with the given limits.
    #[must_use]
    pub fn with_config(context: Arc<MappingContext>, config: ResolverConfig) -> Self {
        Self {
            context,
            config,
            paths: ComputeCache::new(),
        }
    }

    /// The mapping context paths are resolved against.
    #[must_use]
    pub const fn context(&self) -> &Arc<MappingContext> {
        &self.context
    }

    /// The active limits.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Path cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.paths.stats()
    }

    /// Resolves `source` starting at `root`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for an empty or blank source
    /// - `SourceTooLong` / `DepthExceeded` when the configured limits are hit
    /// - `LeadingUnderscore` for an unquoted source starting with `_`
    /// - `PropertyReference` when a segment matches no property
    /// - mapping errors when `root` or a traversed type cannot be discovered
    pub fn resolve(&self, source: &str, root: &TypeName) -> Result<Arc<PropertyPath>> {
        self.validate(source)?;

        let key = (root.clone(), source.to_string());
        if let Some(path) = self.paths.get(&key) {
            trace!(root = %root, source, "property path cache hit");
            return Ok(path);
        }

        self.paths
            .get_or_try_insert_with(key, |(root, source)| self.compute(source, root))
    }

    /// Extends a resolved path by `extension`, resolving the combined dotted
    /// path from the path's owning type.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn nested(&self, path: &PropertyPath, extension: &str) -> Result<Arc<PropertyPath>> {
        if extension.trim().is_empty() {
            return Err(Error::invalid_argument(
                "nested path extension must not be empty",
            ));
        }
        let lookup = format!("{}.{extension}", path.to_dot_path());
        self.resolve(&lookup, path.owning_type())
    }

    /// Looks up the persistent properties behind each segment of `path`.
    ///
    /// # Errors
    ///
    /// Returns a mapping or resolution error if a segment's owner is not an
    /// entity or lacks the property.
    pub fn persistent_property_path(&self, path: &PropertyPath) -> Result<PersistentPropertyPath> {
        let properties = path
            .iter()
            .map(|segment| {
                let entity = self.context.persistent_entity(segment.owning_type())?;
                entity
                    .required_persistent_property(segment.segment())
                    .map(Arc::clone)
            })
            .collect::<Result<Vec<_>>>()?;
        PersistentPropertyPath::new(properties)
    }

    fn validate(&self, source: &str) -> Result<()> {
        if source.trim().is_empty() {
            return Err(Error::invalid_argument(
                "property path source must not be empty",
            ));
        }
        if source.len() > self.config.max_source_length {
            return Err(Error::new(ErrorKind::SourceTooLong {
                limit: self.config.max_source_length,
                length: source.len(),
            }));
        }
        Ok(())
    }

    fn compute(&self, source: &str, root: &TypeName) -> Result<Arc<PropertyPath>> {
        self.context.persistent_entity(root)?;

        let parts = splitter::split(source);
        if parts.is_empty() {
            return Err(Error::invalid_argument(format!(
                "property path '{source}' contains no property name"
            )));
        }
        if !splitter::is_quoted(source) {
            if let Some(part) = parts.iter().find(|p| p.starts_with('_')) {
                return Err(Error::new(ErrorKind::LeadingUnderscore {
                    property: part.clone(),
                }));
            }
        }
        if parts.len() > self.config.max_depth {
            return Err(Error::depth_exceeded(self.config.max_depth, parts.len()));
        }

        let mut owner = Type::Struct(root.clone());
        let mut base: Vec<String> = Vec::new();
        let mut segments: Vec<Segment> = Vec::new();

        for part in &parts {
            match self.create(part, &owner, &base)? {
                Resolution::Resolved(resolved) => {
                    if let Some(last) = resolved.last() {
                        owner = last.ty.actual_type().clone();
                    }
                    base.extend(resolved.iter().map(|s| s.name.clone()));
                    segments.extend(resolved);
                }
                Resolution::Unresolved(error) => {
                    return Err(Error::property_reference(error).with_context(
                        ErrorContext::new().with_frame(format!(
                            "resolving '{}' on {root}",
                            splitter::elide(source, FRAME_SOURCE_CHARS)
                        )),
                    ));
                }
            }
        }

        let path = Self::link(segments).ok_or_else(|| {
            Error::invalid_argument(format!("property path '{source}' resolved to nothing"))
        })?;
        debug!(
            root = %root,
            source,
            path = %path.to_dot_path(),
            "resolved property path"
        );
        Ok(path)
    }

    /// Resolves one delimited part, descending hop by hop.
    ///
    /// Each hop matches the longest camel-case head of the pending source
    /// and continues with the rest against the head's actual type. A hop
    /// whose head resolves never backtracks into a shorter head, so the
    /// descent is a single chain walked without recursion.
    fn create(&self, part: &str, owner: &Type, base: &[String]) -> Result<Resolution> {
        let mut owner = owner.clone();
        let mut pending = part;
        let mut trail = base.to_vec();
        let mut segments = Vec::new();
        let mut skipped: Vec<Option<PropertyReferenceError>> = Vec::new();

        loop {
            if trail.len() >= self.config.max_depth {
                return Err(Error::depth_exceeded(self.config.max_depth, trail.len() + 1));
            }
            match self.hop(pending, &owner, &trail)? {
                Hop::Matched {
                    segment,
                    rest,
                    first_miss,
                } => {
                    owner = segment.ty.actual_type().clone();
                    trail.push(segment.name.clone());
                    segments.push(segment);
                    if rest.is_empty() {
                        return Ok(Resolution::Resolved(segments));
                    }
                    skipped.push(first_miss);
                    pending = rest;
                }
                Hop::Failed(error) => {
                    let error = skipped
                        .into_iter()
                        .rev()
                        .fold(error, |inner, miss| Self::deepest(miss, inner));
                    return Ok(Resolution::Unresolved(error));
                }
            }
        }
    }

    /// Matches the longest camel-case head of `source` on `owner`.
    ///
    /// Every miss on one hop has the same depth, so only the first (longest
    /// head) is kept for error reporting.
    fn hop<'s>(&self, source: &'s str, owner: &Type, base: &[String]) -> Result<Hop<'s>> {
        let entity = match owner.actual_type().struct_name() {
            Some(type_name) if !self.context.is_simple_type(owner) => {
                Some(self.context.persistent_entity(type_name)?)
            }
            _ => None,
        };
        // Uncapitalizing may grow a non-ASCII first character by a few bytes.
        let longest = entity
            .as_ref()
            .and_then(|e| e.property_names().map(str::len).max())
            .map_or(0, |len| len + 4);

        let mut head = source;
        let mut first_miss = None;
        loop {
            if let Some(entity) = entity.as_ref().filter(|_| head.len() <= longest) {
                let name = splitter::uncapitalize(head);
                if let Some(property) = entity.persistent_property(&name) {
                    return Ok(Hop::Matched {
                        segment: Segment {
                            name,
                            owning_type: entity.type_name().clone(),
                            ty: property.type_info().clone(),
                        },
                        rest: &source[head.len()..],
                        first_miss,
                    });
                }
            }
            if first_miss.is_none() {
                first_miss = Some(self.unresolved(head, owner, base));
            }

            let Some((shorter, word)) = splitter::split_last_word(head) else {
                break;
            };
            trace!(head = shorter, word, "retrying with shorter camel-case head");
            head = shorter;
        }

        first_miss.map(Hop::Failed).ok_or_else(|| {
            Error::invalid_argument(format!("empty property segment in '{source}'"))
        })
    }

    fn unresolved(&self, head: &str, owner: &Type, base: &[String]) -> PropertyReferenceError {
        let name = splitter::uncapitalize(head);
        let actual = owner.actual_type();
        let (type_name, suggestions) = match actual.struct_name() {
            Some(type_name) => {
                let suggestions = self
                    .context
                    .persistent_entity(type_name)
                    .map(|entity| {
                        suggest::suggestions(
                            &name,
                            entity.property_names(),
                            self.config.suggestion_distance,
                        )
                    })
                    .unwrap_or_default();
                (type_name.clone(), suggestions)
            }
            None => (TypeName::new(actual.to_string()), Vec::new()),
        };
        PropertyReferenceError::new(name, type_name)
            .with_resolved_path(base.to_vec())
            .with_suggestions(suggestions)
    }

    /// Keeps `current` unless `candidate` got strictly deeper.
    fn deepest(
        current: Option<PropertyReferenceError>,
        candidate: PropertyReferenceError,
    ) -> PropertyReferenceError {
        match current {
            Some(current) if !candidate.is_deeper_than(&current) => current,
            _ => candidate,
        }
    }

    fn link(segments: Vec<Segment>) -> Option<Arc<PropertyPath>> {
        segments.into_iter().rev().fold(None, |next, segment| {
            Some(Arc::new(PropertyPath::new(
                segment.name,
                segment.owning_type,
                segment.ty,
                next,
            )))
        })
    }
}
