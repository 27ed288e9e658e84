//! Shared proptest strategies.

use proptest::prelude::*;

use crate::RiskLevel;

/// Any risk level.
pub(crate) fn arb_risk_level() -> impl Strategy<Value = RiskLevel> {
    prop::sample::select(RiskLevel::ALL.to_vec())
}
