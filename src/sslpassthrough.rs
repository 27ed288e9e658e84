//! The `ssl-passthrough` annotation.
//!
//! When set, the proxy forwards TLS connections to the backend untouched
//! instead of terminating them itself.

use std::sync::Arc;

use crate::{
    Annotation, AnnotationFieldSpec, AnnotationScope, BoolAnnotationParser, RiskLevel,
    SecurityConfigProvider, ValueValidator,
};

/// Bare annotation name.
pub const SSL_PASSTHROUGH_ANNOTATION: &str = "ssl-passthrough";

/// Parser for `ssl-passthrough`; extracts a `bool` defaulting to `false`.
pub type SslPassthroughParser = BoolAnnotationParser;

/// Returns the catalog entry for `ssl-passthrough`.
pub fn annotations() -> Annotation {
    Annotation::new("").with_field(
        SSL_PASSTHROUGH_ANNOTATION,
        AnnotationFieldSpec {
            validator: ValueValidator::Bool,
            scope: AnnotationScope::Ingress,
            // Only toggles forwarding mode; no user-controlled content reaches the proxy.
            risk: RiskLevel::Low,
            documentation: "This annotation instructs the controller to send TLS connections \
                            directly to the backend instead of letting the proxy decrypt the \
                            communication.",
        },
    )
}

/// Creates the `ssl-passthrough` parser.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use annotation_policy::{sslpassthrough, AnnotationParser, Resource, SecurityConfiguration};
///
/// let parser = sslpassthrough::new_parser(Arc::new(SecurityConfiguration::new("Low")));
/// let ingress = Resource::new("default", "web").with_annotation("ssl-passthrough", "true");
///
/// assert_eq!(parser.parse(&ingress), Ok(true));
/// assert!(parser.validate(ingress.annotations.as_ref().unwrap()).is_ok());
/// ```
pub fn new_parser(provider: Arc<dyn SecurityConfigProvider>) -> SslPassthroughParser {
    BoolAnnotationParser::new(SSL_PASSTHROUGH_ANNOTATION, false, annotations(), provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnnotationParser, Annotations, Error, ErrorKind, Resource, SecurityConfiguration};

    fn parser(level: &str) -> SslPassthroughParser {
        new_parser(Arc::new(SecurityConfiguration::new(level)))
    }

    fn ingress(value: &str) -> Resource {
        Resource::new("default", "web").with_annotation(SSL_PASSTHROUGH_ANNOTATION, value)
    }

    #[test]
    fn missing_map_is_an_error() {
        let res = Resource::new("default", "web");
        assert_eq!(parser("Low").parse(&res), Err(Error::MissingAnnotations));
    }

    #[test]
    fn absent_key_is_false() {
        let res = Resource::new("default", "web").with_annotations(Annotations::new());
        assert_eq!(parser("Low").parse(&res), Ok(false));
    }

    #[test]
    fn parses_booleans() {
        let p = parser("Low");
        assert_eq!(p.parse(&ingress("true")), Ok(true));
        assert_eq!(p.parse(&ingress("True")), Ok(true));
        assert_eq!(p.parse(&ingress("false")), Ok(false));
        assert_eq!(p.parse(&ingress("maybe")).unwrap_err().kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn honours_configured_prefix() {
        let config = SecurityConfiguration::new("Low").with_annotation_prefix("nginx.ingress.kubernetes.io");
        let p = new_parser(Arc::new(config));

        let prefixed = Resource::new("default", "web")
            .with_annotation("nginx.ingress.kubernetes.io/ssl-passthrough", "true");
        assert_eq!(p.parse(&prefixed), Ok(true));

        // A bare key is not ours once a prefix is configured.
        assert_eq!(p.parse(&ingress("true")), Ok(false));
    }

    #[test]
    fn documentation_is_the_catalog_entry() {
        let p = parser("Low");
        let docs = p.documentation();

        assert_eq!(docs, annotations().fields());
        let spec = &docs[SSL_PASSTHROUGH_ANNOTATION];
        assert_eq!(spec.validator, ValueValidator::Bool);
        assert_eq!(spec.scope, AnnotationScope::Ingress);
        assert_eq!(spec.risk, RiskLevel::Low);
        assert!(spec.documentation.contains("TLS connections"));
        assert_eq!(p.documentation(), docs);
    }

    #[test]
    fn low_risk_passes_every_level() {
        let anns = ingress("true").annotations.unwrap();
        for level in ["Low", "Medium", "High", "Critical"] {
            assert!(parser(level).validate(&anns).is_ok(), "level {}", level);
        }
    }
}
