use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::{Error, RiskLevel};

/// Config-map key holding the maximum admissible annotation risk.
pub const RISK_LEVEL_KEY: &str = "annotations-risk-level";
/// Config-map key holding the annotation key prefix.
pub const PREFIX_KEY: &str = "annotations-prefix";

/// Administrator-controlled settings consulted when validating annotations.
///
/// The risk level is kept as the raw configured string; it is converted on
/// every use with [`max_risk`](Self::max_risk), which fails closed on
/// unrecognized input.
///
/// # Examples
///
/// ```
/// use annotation_policy::{RiskLevel, SecurityConfiguration};
///
/// let config = SecurityConfiguration::new("Medium")
///     .with_annotation_prefix("nginx.ingress.kubernetes.io");
///
/// assert_eq!(config.max_risk(), Ok(RiskLevel::Medium));
/// assert_eq!(config.annotation_key("ssl-passthrough"), "nginx.ingress.kubernetes.io/ssl-passthrough");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfiguration {
    /// Maximum admissible risk, as configured
    pub annotations_risk_level: String,
    /// Prefix of annotation keys on resources; empty for bare keys
    pub annotation_prefix: String,
}

impl Default for SecurityConfiguration {
    /// Admits every cataloged annotation and uses bare keys.
    fn default() -> Self {
        Self {
            annotations_risk_level: RiskLevel::Critical.as_str().to_string(),
            annotation_prefix: String::new(),
        }
    }
}

impl SecurityConfiguration {
    /// Creates a configuration with the given risk level and bare keys.
    pub fn new(annotations_risk_level: impl Into<String>) -> Self {
        Self {
            annotations_risk_level: annotations_risk_level.into(),
            annotation_prefix: String::new(),
        }
    }

    /// Sets the annotation key prefix.
    pub fn with_annotation_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.annotation_prefix = prefix.into();
        self
    }

    /// Loads settings from controller config-map entries.
    ///
    /// Missing keys keep their defaults. The risk level is checked here so a
    /// bad value is reported when configuration is loaded rather than on the
    /// first validation pass.
    ///
    /// # Errors
    ///
    /// - [`Error::UnrecognizedRiskLevel`] if the risk level is unknown
    /// - [`Error::InvalidConfiguration`] if the prefix contains `/` or whitespace
    pub fn from_config_map(entries: &BTreeMap<String, String>) -> Result<Self, Error> {
        let mut config = Self::default();

        if let Some(level) = entries.get(RISK_LEVEL_KEY) {
            level.parse::<RiskLevel>()?;
            config.annotations_risk_level = level.clone();
        }

        if let Some(prefix) = entries.get(PREFIX_KEY) {
            if prefix.contains('/') || prefix.chars().any(char::is_whitespace) {
                return Err(Error::InvalidConfiguration {
                    key: PREFIX_KEY.to_string(),
                    reason: "prefix must not contain '/' or whitespace".to_string(),
                });
            }
            config.annotation_prefix = prefix.clone();
        }

        tracing::debug!(
            risk_level = %config.annotations_risk_level,
            prefix = %config.annotation_prefix,
            "loaded security configuration"
        );

        Ok(config)
    }

    /// Converts the configured risk level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedRiskLevel`] if the string is not a known level.
    pub fn max_risk(&self) -> Result<RiskLevel, Error> {
        self.annotations_risk_level.parse()
    }

    /// Returns the key under which annotation `name` appears on resources.
    pub fn annotation_key(&self, name: &str) -> String {
        prefixed_key(&self.annotation_prefix, name)
    }
}

pub(crate) fn prefixed_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

/// Supplies the current security configuration.
///
/// Reads are synchronous and may be repeated per call, so implementations
/// can reflect configuration reloads.
pub trait SecurityConfigProvider: Send + Sync {
    /// Returns the current security configuration.
    fn security_configuration(&self) -> SecurityConfiguration;

    /// Returns the current annotation key prefix.
    ///
    /// Providers that hold their configuration directly should borrow it.
    fn annotation_prefix(&self) -> Cow<'_, str> {
        Cow::Owned(self.security_configuration().annotation_prefix)
    }
}

impl SecurityConfigProvider for SecurityConfiguration {
    fn security_configuration(&self) -> SecurityConfiguration {
        self.clone()
    }

    fn annotation_prefix(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.annotation_prefix)
    }
}
