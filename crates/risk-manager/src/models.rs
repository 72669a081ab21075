use analysis_core::RiskRuleKind;
use serde::{Deserialize, Serialize};

/// Multiplier applied to the summed risk factor triple (roughly 100 / 3)
pub const RISK_FACTOR_SCALE: f64 = 33.33;

/// A breached risk rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule_id: String,
    pub kind: RiskRuleKind,
    pub symbol: String,
    pub limit_percent: u32,
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            RiskRuleKind::SingleCoinLimit => write!(
                f,
                "{} may exceed the {}% single-coin limit",
                self.symbol, self.limit_percent
            ),
            RiskRuleKind::MemecoinLimit => write!(
                f,
                "{} is a memecoin and must respect the {}% memecoin limit",
                self.symbol, self.limit_percent
            ),
            other => write!(
                f,
                "{} breaches the {}% '{}' limit",
                self.symbol,
                self.limit_percent,
                other.label()
            ),
        }
    }
}
