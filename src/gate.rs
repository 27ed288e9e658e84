use crate::{
    config::SecurityConfiguration,
    error::Error,
    risk::RiskLevel,
    AnnotationFields, Annotations,
};

/// Rejects annotations whose declared risk exceeds the configured maximum.
///
/// The gate only looks at keys: whether a value is well formed is the
/// validator's concern, so a perfectly valid value is still rejected when
/// its annotation is classified above policy.
///
/// # Examples
///
/// ```
/// use annotation_policy::{Annotation, AnnotationFieldSpec, AnnotationScope, Annotations, RiskGate, RiskLevel, ValueValidator};
///
/// let catalog = Annotation::new("").with_field(
///     "configuration-snippet",
///     AnnotationFieldSpec {
///         validator: ValueValidator::Null,
///         scope: AnnotationScope::Location,
///         risk: RiskLevel::Critical,
///         documentation: "Raw proxy configuration.",
///     },
/// );
///
/// let mut present = Annotations::new();
/// present.insert("configuration-snippet".to_string(), "return 200;".to_string());
///
/// let gate = RiskGate::new(RiskLevel::High);
/// assert!(gate.check(&present, catalog.fields()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskGate {
    max_allowed: RiskLevel,
    prefix: String,
}

impl RiskGate {
    /// Creates a gate admitting annotations up to `max_allowed`, for bare keys.
    pub fn new(max_allowed: RiskLevel) -> Self {
        Self {
            max_allowed,
            prefix: String::new(),
        }
    }

    /// Sets the prefix that annotation keys carry on resources.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Builds a gate from a security configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedRiskLevel`] if the configured level is unknown.
    pub fn from_configuration(config: &SecurityConfiguration) -> Result<Self, Error> {
        Ok(Self::new(config.max_risk()?).with_prefix(config.annotation_prefix.clone()))
    }

    /// Returns the maximum admissible risk.
    pub fn max_allowed(&self) -> RiskLevel {
        self.max_allowed
    }

    /// Checks every present, cataloged annotation against the maximum.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RiskExceeded`] for the first violation in key order.
    pub fn check(&self, present: &Annotations, catalog: &AnnotationFields) -> Result<(), Error> {
        check_annotation_risk(present, self.max_allowed, catalog, &self.prefix)
    }
}

/// Checks the declared risk of every present annotation found in `catalog`.
///
/// Keys on resources carry `prefix` (unless it is empty); keys without it,
/// and keys not in the catalog, are ignored. Every key is checked and every
/// violation is logged; the returned error names the first one in ascending
/// key order.
///
/// # Errors
///
/// Returns [`Error::RiskExceeded`] if any cataloged annotation is declared
/// above `max_allowed`.
pub fn check_annotation_risk(
    present: &Annotations,
    max_allowed: RiskLevel,
    catalog: &AnnotationFields,
    prefix: &str,
) -> Result<(), Error> {
    let mut first_violation = None;

    for key in present.keys() {
        let Some(spec) = strip_prefix(key, prefix).and_then(|name| catalog.get(name)) else {
            continue;
        };

        if spec.risk > max_allowed {
            tracing::warn!(
                annotation = %key,
                declared = %spec.risk,
                max_allowed = %max_allowed,
                "annotation is too risky for environment"
            );
            first_violation.get_or_insert_with(|| Error::RiskExceeded {
                key: key.clone(),
                declared: spec.risk,
                max_allowed,
            });
        }
    }

    match first_violation {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn strip_prefix<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        Some(key)
    } else {
        key.strip_prefix(prefix)?.strip_prefix('/')
    }
}
