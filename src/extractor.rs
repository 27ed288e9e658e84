use std::sync::Arc;

use crate::{
    sslpassthrough, Annotated, AnnotationFields, AnnotationParser, Error, SecurityConfigProvider,
    SslPassthroughParser,
};

/// Settings extracted from a resource's annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngressAnnotations {
    /// Forward TLS connections to the backend without terminating them
    pub ssl_passthrough: bool,
}

/// Runs every registered parser over a resource.
///
/// All parsers share one configuration provider. The parser set is fixed at
/// construction and read-only afterwards.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use annotation_policy::{AnnotationExtractor, Resource, SecurityConfiguration};
///
/// let extractor = AnnotationExtractor::new(Arc::new(SecurityConfiguration::new("Low")));
/// let ingress = Resource::new("default", "web").with_annotation("ssl-passthrough", "TRUE");
///
/// let settings = extractor.extract(&ingress).expect("valid annotations");
/// assert!(settings.ssl_passthrough);
/// ```
pub struct AnnotationExtractor {
    provider: Arc<dyn SecurityConfigProvider>,
    ssl_passthrough: SslPassthroughParser,
}

impl AnnotationExtractor {
    /// Builds every parser against `provider`.
    pub fn new(provider: Arc<dyn SecurityConfigProvider>) -> Self {
        Self {
            ssl_passthrough: sslpassthrough::new_parser(Arc::clone(&provider)),
            provider,
        }
    }

    /// Risk-checks the resource's annotations with every parser.
    ///
    /// The configured risk level is resolved first, whatever the resource
    /// carries; after that a resource without an annotation map has nothing
    /// to check.
    ///
    /// # Errors
    ///
    /// - [`Error::UnrecognizedRiskLevel`] if the configured level is unknown
    /// - otherwise the first parser error, in registration order
    pub fn validate(&self, resource: &dyn Annotated) -> Result<(), Error> {
        self.provider.security_configuration().max_risk()?;

        let Some(annotations) = resource.annotations() else {
            return Ok(());
        };

        self.ssl_passthrough.validate(annotations)
    }

    /// Validates, then extracts every setting.
    ///
    /// A parser reporting [`Error::MissingAnnotations`] leaves its setting at
    /// the default.
    ///
    /// # Errors
    ///
    /// Returns any validation error, or any parse error other than
    /// [`Error::MissingAnnotations`].
    pub fn extract(&self, resource: &dyn Annotated) -> Result<IngressAnnotations, Error> {
        self.validate(resource)?;

        let settings = IngressAnnotations {
            ssl_passthrough: or_default(
                self.ssl_passthrough.parse(resource),
                self.ssl_passthrough.default_value(),
            )?,
        };

        tracing::debug!(ssl_passthrough = settings.ssl_passthrough, "extracted annotations");
        Ok(settings)
    }

    /// Merges the catalogs of every parser.
    pub fn documentation(&self) -> AnnotationFields {
        let mut docs = AnnotationFields::new();
        docs.extend(
            self.ssl_passthrough
                .documentation()
                .iter()
                .map(|(name, spec)| (*name, spec.clone())),
        );
        docs
    }
}

impl std::fmt::Debug for AnnotationExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationExtractor")
            .field("ssl_passthrough", &self.ssl_passthrough)
            .finish_non_exhaustive()
    }
}

fn or_default<T>(result: Result<T, Error>, default: T) -> Result<T, Error> {
    match result {
        Err(Error::MissingAnnotations) => Ok(default),
        other => other,
    }
}
