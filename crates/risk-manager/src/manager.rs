use analysis_core::scoring::round_score;
use analysis_core::{normalize_symbol, EngineConfig, RiskFactors, RiskRule, RiskRuleKind};
use std::collections::BTreeSet;

use crate::models::*;

/// Risk scoring and risk-rule violation checks for a single asset.
pub struct RiskManager {
    single_coin_threshold: u32,
    memecoins: BTreeSet<String>,
}

impl Default for RiskManager {
    fn default() -> Self {
        Self::with_config(&EngineConfig::default())
    }
}

impl RiskManager {
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            single_coin_threshold: config.single_coin_threshold,
            memecoins: config.memecoins.clone(),
        }
    }

    /// Safety score in [0, 100], higher is safer.
    ///
    /// Derived only from the asset's factor triple. The user's configured risk rules
    /// do not move this score; they surface through `check_violations` instead.
    pub fn risk_score(&self, factors: &RiskFactors) -> u8 {
        let sum = factors.volatility + factors.correlation + factors.liquidity;
        round_score(sum * RISK_FACTOR_SCALE)
    }

    /// Violations of the active risk rules, in rule order.
    ///
    /// Single-coin limits are a configuration sanity check: there is no live
    /// allocation input, so a limit configured below the threshold is reported.
    pub fn check_violations(&self, symbol: &str, rules: &[RiskRule]) -> Vec<RuleViolation> {
        let symbol = normalize_symbol(symbol);

        rules
            .iter()
            .filter(|rule| rule.is_active)
            .filter(|rule| match &rule.kind {
                RiskRuleKind::SingleCoinLimit => rule.max_allocation < self.single_coin_threshold,
                RiskRuleKind::MemecoinLimit => self.memecoins.contains(&symbol),
                RiskRuleKind::AltcoinLimit | RiskRuleKind::Custom(_) => false,
            })
            .map(|rule| {
                tracing::debug!("{} violates risk rule '{}' ({}%)", symbol, rule.name, rule.max_allocation);
                RuleViolation {
                    rule_id: rule.id.clone(),
                    kind: rule.kind.clone(),
                    symbol: symbol.clone(),
                    limit_percent: rule.max_allocation,
                }
            })
            .collect()
    }
}
