use std::collections::BTreeMap;
use std::fmt;

use crate::{RiskLevel, ValueValidator};

/// Which kind of configuration block an annotation affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationScope {
    /// Affects a single location (path) of an ingress
    Location,
    /// Affects every rule of the ingress
    Ingress,
    /// Affects the backing service
    Service,
}

impl fmt::Display for AnnotationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationScope::Location => write!(f, "location"),
            AnnotationScope::Ingress => write!(f, "ingress"),
            AnnotationScope::Service => write!(f, "service"),
        }
    }
}

/// Declarative metadata about one recognized annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationFieldSpec {
    /// Type contract for the raw value
    pub validator: ValueValidator,
    /// What the annotation applies to
    pub scope: AnnotationScope,
    /// Risk classification checked against the configured maximum
    pub risk: RiskLevel,
    /// User-facing description
    pub documentation: &'static str,
}

/// Catalog entries keyed by bare annotation name.
///
/// A `BTreeMap` so that every pass over a catalog sees keys in the same order.
pub type AnnotationFields = BTreeMap<&'static str, AnnotationFieldSpec>;

/// A named group of related annotation fields.
///
/// Built once when a parser is constructed and never modified afterwards.
///
/// # Examples
///
/// ```
/// use annotation_policy::{Annotation, AnnotationFieldSpec, AnnotationScope, RiskLevel, ValueValidator};
///
/// let catalog = Annotation::new("").with_field(
///     "ssl-passthrough",
///     AnnotationFieldSpec {
///         validator: ValueValidator::Bool,
///         scope: AnnotationScope::Ingress,
///         risk: RiskLevel::Low,
///         documentation: "Send TLS connections directly to the backend.",
///     },
/// );
///
/// assert!(catalog.fields().contains_key("ssl-passthrough"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    group: &'static str,
    annotations: AnnotationFields,
}

impl Annotation {
    /// Creates an empty catalog entry for `group` (may be empty).
    pub fn new(group: &'static str) -> Self {
        Self {
            group,
            annotations: AnnotationFields::new(),
        }
    }

    /// Adds a field, replacing any previous spec for the same name.
    pub fn with_field(mut self, name: &'static str, spec: AnnotationFieldSpec) -> Self {
        self.annotations.insert(name, spec);
        self
    }

    /// Returns the group name.
    pub fn group(&self) -> &'static str {
        self.group
    }

    /// Returns the fields of this group.
    pub fn fields(&self) -> &AnnotationFields {
        &self.annotations
    }
}
