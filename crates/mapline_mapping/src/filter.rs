//! Field exclusion rules applied during entity discovery.
//!
//! A [`PropertyFilter`] is an ordered list of [`ExclusionRule`]s. A field is
//! skipped as soon as any rule excludes it.

use std::fmt;
use std::sync::Arc;

use mapline_foundation::TypeName;

use crate::reflect::{Annotation, FieldShape};

/// Decides whether a declared field is left out of the persistent model.
pub trait ExclusionRule: Send + Sync + fmt::Debug {
    /// Short identifier used in logs and for removal.
    fn name(&self) -> &str;

    /// Returns true if `field` declared on `owner` must be skipped.
    fn excludes(&self, owner: &TypeName, field: &FieldShape) -> bool;
}

/// Skips static fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExcludeStatic;

impl ExclusionRule for ExcludeStatic {
    fn name(&self) -> &str {
        "static"
    }

    fn excludes(&self, _owner: &TypeName, field: &FieldShape) -> bool {
        field.modifiers.is_static
    }
}

/// Skips compiler-generated fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExcludeSynthetic;

impl ExclusionRule for ExcludeSynthetic {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn excludes(&self, _owner: &TypeName, field: &FieldShape) -> bool {
        field.modifiers.is_synthetic
    }
}

/// Skips fields with the language-level transient modifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExcludeTransientModifier;

impl ExclusionRule for ExcludeTransientModifier {
    fn name(&self) -> &str {
        "transient-modifier"
    }

    fn excludes(&self, _owner: &TypeName, field: &FieldShape) -> bool {
        field.modifiers.is_transient
    }
}

/// Skips fields carrying a given annotation.
#[derive(Clone, Debug)]
pub struct ExcludeAnnotated {
    annotation: Annotation,
    name: String,
}

impl ExcludeAnnotated {
    /// Creates a rule excluding fields annotated with `annotation`.
    #[must_use]
    pub fn new(annotation: Annotation) -> Self {
        let name = format!("annotated:{annotation:?}");
        Self { annotation, name }
    }
}

impl ExclusionRule for ExcludeAnnotated {
    fn name(&self) -> &str {
        &self.name
    }

    fn excludes(&self, _owner: &TypeName, field: &FieldShape) -> bool {
        field.is_annotated(&self.annotation)
    }
}

/// Skips fields by name.
#[derive(Clone, Debug)]
pub struct ExcludeNamed {
    names: Vec<String>,
}

impl ExcludeNamed {
    /// Creates a rule excluding the given field names on every type.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl ExclusionRule for ExcludeNamed {
    fn name(&self) -> &str {
        "named"
    }

    fn excludes(&self, _owner: &TypeName, field: &FieldShape) -> bool {
        self.names.iter().any(|n| *n == field.name)
    }
}

/// Ordered set of exclusion rules.
#[derive(Clone, Debug)]
pub struct PropertyFilter {
    rules: Vec<Arc<dyn ExclusionRule>>,
}

impl PropertyFilter {
    /// Creates a filter without rules; every field is kept.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The default rules: static, synthetic, transient modifier, and the
    /// `Transient` annotation.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new()
            .with_rule(ExcludeStatic)
            .with_rule(ExcludeSynthetic)
            .with_rule(ExcludeTransientModifier)
            .with_rule(ExcludeAnnotated::new(Annotation::Transient))
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl ExclusionRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Removes every rule with the given name.
    #[must_use]
    pub fn excluding_rule(mut self, name: &str) -> Self {
        self.rules.retain(|r| r.name() != name);
        self
    }

    /// Returns the first rule that excludes the field, if any.
    #[must_use]
    pub fn excluded_by(&self, owner: &TypeName, field: &FieldShape) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.excludes(owner, field))
            .map(|r| r.name())
    }

    /// Returns true if any rule excludes the field.
    #[must_use]
    pub fn excludes(&self, owner: &TypeName, field: &FieldShape) -> bool {
        self.excluded_by(owner, field).is_some()
    }

    /// Names of the configured rules, in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for PropertyFilter {
    fn default() -> Self {
        Self::defaults()
    }
}
