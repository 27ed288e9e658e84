use std::sync::Arc;

use crate::{
    config::prefixed_key, gate::check_annotation_risk, parse_bool, Annotated, Annotation,
    AnnotationFields, Annotations, Error, SecurityConfigProvider,
};

/// Extracts one typed setting from a resource's annotations.
///
/// Extraction and risk validation are separate passes: [`parse`](Self::parse)
/// only checks the shape of the value, while [`validate`](Self::validate)
/// only checks the declared risk of whatever annotations are present. Callers
/// are expected to run both.
pub trait AnnotationParser {
    /// The typed value produced by this parser.
    type Output;

    /// Extracts the setting from `resource`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingAnnotations`] if the resource has no annotation map
    /// - [`Error::InvalidValue`] if the annotation is present but malformed
    fn parse(&self, resource: &dyn Annotated) -> Result<Self::Output, Error>;

    /// Returns the catalog entries this parser recognizes.
    fn documentation(&self) -> &AnnotationFields;

    /// Checks the present annotations against the configured maximum risk.
    ///
    /// # Errors
    ///
    /// - [`Error::UnrecognizedRiskLevel`] if the configured level is unknown
    /// - [`Error::RiskExceeded`] if a cataloged annotation is too risky
    fn validate(&self, annotations: &Annotations) -> Result<(), Error>;
}

/// Reads the boolean annotation `name` through its catalog validator.
///
/// Returns `Ok(None)` when the key is not present.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] if the value is malformed or `name` is not
/// in `fields`.
pub fn get_bool_annotation(
    name: &str,
    annotations: &Annotations,
    fields: &AnnotationFields,
    prefix: &str,
) -> Result<Option<bool>, Error> {
    let key = prefixed_key(prefix, name);
    let Some(value) = annotations.get(&key) else {
        return Ok(None);
    };

    let spec = fields
        .get(name)
        .ok_or_else(|| Error::invalid_value(&key, "annotation is not registered"))?;
    spec.validator.validate(&key, value)?;

    parse_bool(&key, value).map(Some)
}

/// Parser for a single boolean annotation.
///
/// A missing key yields the parser's default, so "annotation not set" means
/// the feature keeps its default state.
pub struct BoolAnnotationParser {
    name: &'static str,
    default: bool,
    config: Annotation,
    provider: Arc<dyn SecurityConfigProvider>,
}

impl BoolAnnotationParser {
    /// Creates a parser for `name`, which must be one of `config`'s fields.
    pub fn new(
        name: &'static str,
        default: bool,
        config: Annotation,
        provider: Arc<dyn SecurityConfigProvider>,
    ) -> Self {
        debug_assert!(
            config.fields().contains_key(name),
            "annotation '{}' missing from its catalog entry",
            name
        );
        Self {
            name,
            default,
            config,
            provider,
        }
    }

    /// Returns the bare annotation name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the value used when the annotation is not set.
    pub fn default_value(&self) -> bool {
        self.default
    }

    /// Returns the catalog group.
    pub fn annotation(&self) -> &Annotation {
        &self.config
    }
}

impl std::fmt::Debug for BoolAnnotationParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoolAnnotationParser")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AnnotationParser for BoolAnnotationParser {
    type Output = bool;

    fn parse(&self, resource: &dyn Annotated) -> Result<bool, Error> {
        let annotations = resource.annotations().ok_or(Error::MissingAnnotations)?;
        let prefix = self.provider.annotation_prefix();

        let value = get_bool_annotation(self.name, annotations, self.config.fields(), &prefix)?
            .unwrap_or(self.default);

        tracing::debug!(annotation = self.name, value, "parsed boolean annotation");
        Ok(value)
    }

    fn documentation(&self) -> &AnnotationFields {
        self.config.fields()
    }

    fn validate(&self, annotations: &Annotations) -> Result<(), Error> {
        let config = self.provider.security_configuration();
        let max_risk = config.max_risk()?;
        check_annotation_risk(
            annotations,
            max_risk,
            self.config.fields(),
            &config.annotation_prefix,
        )
    }
}
