use analysis_core::scoring::{effective_weight, weighted_score, NEUTRAL_SCORE, UNKNOWN_FACTOR_SCORE};
use analysis_core::{EngineConfig, RuleContribution, TechnicalIndicator, TechnicalSignals};

use crate::indicators::*;

/// Scores an asset against the user's technical indicators.
///
/// Unlike fundamentals, readings are not passed through: each indicator first
/// translates its raw reading (RSI value, MACD trend) into a contribution.
pub struct TechnicalAnalysisEngine {
    neutral_score: u8,
    unknown_factor_score: f64,
}

impl Default for TechnicalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TechnicalAnalysisEngine {
    pub fn new() -> Self {
        Self {
            neutral_score: NEUTRAL_SCORE,
            unknown_factor_score: UNKNOWN_FACTOR_SCORE,
        }
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            neutral_score: config.neutral_score,
            unknown_factor_score: config.unknown_factor_score,
        }
    }

    pub fn contributions(
        &self,
        indicators: &[TechnicalIndicator],
        signals: &TechnicalSignals,
    ) -> Vec<RuleContribution> {
        indicators
            .iter()
            .filter(|indicator| indicator.is_active)
            .map(|indicator| {
                if indicator.weight < 0 {
                    tracing::warn!(
                        "Technical indicator '{}' has negative weight {}, ignoring",
                        indicator.name,
                        indicator.weight
                    );
                }
                let kind = IndicatorKind::from_name(&indicator.name);
                RuleContribution {
                    rule: indicator.name.clone(),
                    weight: effective_weight(indicator.weight),
                    contribution: indicator_contribution(kind, signals, self.unknown_factor_score),
                }
            })
            .collect()
    }

    /// Technical category score in [0, 100]
    pub fn score(&self, indicators: &[TechnicalIndicator], signals: &TechnicalSignals) -> u8 {
        let contributions = self.contributions(indicators, signals);
        let score = weighted_score(
            contributions.iter().map(|c| (c.contribution, c.weight)),
            self.neutral_score,
        );
        tracing::debug!("Technical score {} from {} active indicators", score, contributions.len());
        score
    }
}
