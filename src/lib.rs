//! Risk-gated extraction of typed settings from resource annotations.
//!
//! Resources carry free-form string annotations. This crate turns them into
//! typed, validated settings while enforcing an administrator-configured
//! maximum risk:
//! - **Catalog**: declarative metadata per annotation (validator, scope, risk, docs)
//! - **Validators**: pure type contracts over raw string values
//! - **Risk gate**: rejects annotations classified above the configured maximum
//! - **Parsers**: one per setting, combining the above
//!
//! # Core Types
//!
//! - [`Annotation`]: Immutable catalog group of [`AnnotationFieldSpec`]s
//! - [`ValueValidator`]: Type contract for an annotation value
//! - [`RiskLevel`]: Ordered risk classification
//! - [`RiskGate`]: Admissibility check against a maximum risk
//! - [`AnnotationParser`]: Extraction and risk validation for one setting
//! - [`AnnotationExtractor`]: Runs every parser over a resource
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use annotation_policy::{sslpassthrough, AnnotationParser, ErrorKind, Resource, SecurityConfiguration};
//!
//! let parser = sslpassthrough::new_parser(Arc::new(SecurityConfiguration::new("Low")));
//!
//! let ingress = Resource::new("default", "tls-app").with_annotation("ssl-passthrough", "true");
//! assert_eq!(parser.parse(&ingress), Ok(true));
//! assert!(parser.validate(ingress.annotations.as_ref().unwrap()).is_ok());
//!
//! let bare = Resource::new("default", "no-annotations");
//! assert_eq!(parser.parse(&bare).unwrap_err().kind(), ErrorKind::MissingAnnotations);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod extractor;
mod gate;
mod parser;
mod resource;
mod risk;
pub mod sslpassthrough;
mod validator;

#[cfg(test)]
mod test_utils;

pub use catalog::{Annotation, AnnotationFieldSpec, AnnotationFields, AnnotationScope};
pub use config::{SecurityConfigProvider, SecurityConfiguration, PREFIX_KEY, RISK_LEVEL_KEY};
pub use error::{Error, ErrorKind};
pub use extractor::{AnnotationExtractor, IngressAnnotations};
pub use gate::{check_annotation_risk, RiskGate};
pub use parser::{get_bool_annotation, AnnotationParser, BoolAnnotationParser};
pub use resource::{Annotated, Annotations, Resource};
pub use risk::RiskLevel;
pub use sslpassthrough::SslPassthroughParser;
pub use validator::{parse_bool, parse_int, ValueValidator};
