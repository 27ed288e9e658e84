use std::fmt;
use std::str::FromStr;

use crate::Error;

/// How much operational risk an annotation's effect poses.
///
/// Levels are totally ordered: `Low < Medium < High < Critical`. An
/// annotation is admissible when its declared level is less than or equal
/// to the maximum configured by the administrator.
///
/// # Examples
///
/// ```
/// use annotation_policy::RiskLevel;
///
/// let max: RiskLevel = "medium".parse().unwrap();
/// assert!(RiskLevel::Low <= max);
/// assert!(RiskLevel::High > max);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    /// Limited, well-understood effect
    Low,
    /// Can change routing or request handling in visible ways
    Medium,
    /// Can weaken isolation or expose backends
    High,
    /// Can inject arbitrary proxy configuration
    Critical,
}

impl RiskLevel {
    /// All levels in ascending order.
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    /// Returns the canonical configuration spelling of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts an administrator-supplied threshold into a [`RiskLevel`].
///
/// Matching is ASCII case-insensitive and ignores surrounding whitespace.
/// Anything else fails closed with [`Error::UnrecognizedRiskLevel`] rather
/// than falling back to some level.
impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnrecognizedRiskLevel(s.to_string()))
    }
}
