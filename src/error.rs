use std::fmt;

use crate::RiskLevel;

/// Errors produced while extracting or risk-checking annotations.
///
/// None of these are fatal: they are deterministic validation outcomes that
/// callers surface to operators as configuration-rejection diagnostics.
/// Rejected annotation values are never echoed back in messages, only the
/// key that carried them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The resource carries no annotation map at all.
    MissingAnnotations,
    /// A present annotation value failed its type validator.
    InvalidValue {
        /// The annotation key that carried the value
        key: String,
        /// Why the value was rejected
        reason: String,
    },
    /// An annotation's declared risk is above the configured tolerance.
    RiskExceeded {
        /// The annotation key as it appears on the resource
        key: String,
        /// Risk declared by the annotation's catalog entry
        declared: RiskLevel,
        /// Maximum risk the security configuration admits
        max_allowed: RiskLevel,
    },
    /// The configured risk threshold is not a known risk level.
    UnrecognizedRiskLevel(String),
    /// A configuration entry could not be accepted.
    InvalidConfiguration {
        /// The configuration key
        key: String,
        /// Why the entry was rejected
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidValue`].
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns the payload-free kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingAnnotations => ErrorKind::MissingAnnotations,
            Error::InvalidValue { .. } => ErrorKind::InvalidValue,
            Error::RiskExceeded { .. } => ErrorKind::RiskExceeded,
            Error::UnrecognizedRiskLevel(_) => ErrorKind::UnrecognizedRiskLevel,
            Error::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingAnnotations => write!(f, "resource has no annotations"),
            Error::InvalidValue { key, reason } => {
                write!(f, "invalid value for annotation '{}': {}", key, reason)
            }
            Error::RiskExceeded {
                key,
                declared,
                max_allowed,
            } => write!(
                f,
                "annotation '{}' is too risky for environment (declared {}, allowed up to {})",
                key, declared, max_allowed
            ),
            Error::UnrecognizedRiskLevel(level) => {
                write!(f, "unrecognized annotation risk level '{}'", level)
            }
            Error::InvalidConfiguration { key, reason } => {
                write!(f, "invalid configuration '{}': {}", key, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

/// The kind of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::MissingAnnotations`]
    MissingAnnotations,
    /// See [`Error::InvalidValue`]
    InvalidValue,
    /// See [`Error::RiskExceeded`]
    RiskExceeded,
    /// See [`Error::UnrecognizedRiskLevel`]
    UnrecognizedRiskLevel,
    /// See [`Error::InvalidConfiguration`]
    InvalidConfiguration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingAnnotations => write!(f, "missing annotations"),
            ErrorKind::InvalidValue => write!(f, "invalid value"),
            ErrorKind::RiskExceeded => write!(f, "risk exceeded"),
            ErrorKind::UnrecognizedRiskLevel => write!(f, "unrecognized risk level"),
            ErrorKind::InvalidConfiguration => write!(f, "invalid configuration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Error::MissingAnnotations.kind(), ErrorKind::MissingAnnotations);
        assert_eq!(
            Error::invalid_value("k", "bad").kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(
            Error::UnrecognizedRiskLevel("x".to_string()).kind(),
            ErrorKind::UnrecognizedRiskLevel
        );
    }

    #[test]
    fn risk_exceeded_display_names_levels() {
        let err = Error::RiskExceeded {
            key: "ssl-passthrough".to_string(),
            declared: RiskLevel::High,
            max_allowed: RiskLevel::Low,
        };

        let output = format!("{}", err);
        assert!(output.contains("ssl-passthrough"));
        assert!(output.contains("High"));
        assert!(output.contains("Low"));
    }

    #[test]
    fn invalid_value_display_omits_value() {
        let err = Error::invalid_value("ssl-passthrough", "expected 'true' or 'false'");
        let output = format!("{}", err);

        assert!(output.contains("ssl-passthrough"));
        assert!(output.contains("expected 'true' or 'false'"));
    }
}
