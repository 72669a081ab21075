use analysis_core::scoring::{clamp_contribution, effective_weight, weighted_score, NEUTRAL_SCORE, UNKNOWN_FACTOR_SCORE};
use analysis_core::{EngineConfig, FundamentalRule, RuleContribution};
use std::collections::BTreeMap;

/// Scores an asset against the user's fundamental rules.
///
/// Each active rule looks up the factor of the same name in the asset's fundamental
/// signal map; the category score is the weight-normalized average of those factors.
pub struct FundamentalAnalysisEngine {
    neutral_score: u8,
    unknown_factor_score: f64,
}

impl Default for FundamentalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FundamentalAnalysisEngine {
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

    /// Per-rule contributions for every active rule, in rule order
    pub fn contributions(
        &self,
        rules: &[FundamentalRule],
        factors: &BTreeMap<String, f64>,
    ) -> Vec<RuleContribution> {
        rules
            .iter()
            .filter(|rule| rule.is_active)
            .map(|rule| {
                if rule.weight < 0 {
                    tracing::warn!("Fundamental rule '{}' has negative weight {}, ignoring", rule.name, rule.weight);
                }
                let contribution = factors
                    .get(&rule.name)
                    .copied()
                    .unwrap_or(self.unknown_factor_score);
                RuleContribution {
                    rule: rule.name.clone(),
                    weight: effective_weight(rule.weight),
                    contribution: clamp_contribution(contribution),
                }
            })
            .collect()
    }

    /// Fundamental category score in [0, 100]
    pub fn score(&self, rules: &[FundamentalRule], factors: &BTreeMap<String, f64>) -> u8 {
        let contributions = self.contributions(rules, factors);
        let score = weighted_score(
            contributions.iter().map(|c| (c.contribution, c.weight)),
            self.neutral_score,
        );
        tracing::debug!("Fundamental score {} from {} active rules", score, contributions.len());
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc_factors() -> BTreeMap<String, f64> {
        [("Market Cap", 95.0), ("Team & Development", 90.0), ("Use Case", 85.0), ("Tokenomics", 80.0)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    fn preset_rules() -> Vec<FundamentalRule> {
        vec![
            FundamentalRule::new("1", "Market Cap", "", 25),
            FundamentalRule::new("2", "Team & Development", "", 30),
            FundamentalRule::new("3", "Use Case", "", 25),
            FundamentalRule::new("4", "Tokenomics", "", 20),
        ]
    }

    #[test]
    fn test_preset_rules_for_btc() {
        let engine = FundamentalAnalysisEngine::new();
        // (95*25 + 90*30 + 85*25 + 80*20) / 100 = 88
        assert_eq!(engine.score(&preset_rules(), &btc_factors()), 88);
    }

    #[test]
    fn test_weights_need_not_sum_to_100() {
        let engine = FundamentalAnalysisEngine::new();
        let rules = vec![
            FundamentalRule::new("1", "Market Cap", "", 10),
            FundamentalRule::new("2", "Tokenomics", "", 10),
        ];
        // (95 + 80) / 2 = 87.5
        assert_eq!(engine.score(&rules, &btc_factors()), 88);
    }

    #[test]
    fn test_all_inactive_is_neutral() {
        let engine = FundamentalAnalysisEngine::new();
        let rules: Vec<FundamentalRule> = preset_rules()
            .into_iter()
            .map(|mut r| {
                r.is_active = false;
                r.weight = 50;
                r
            })
            .collect();
        assert_eq!(engine.score(&rules, &btc_factors()), 70);
        assert_eq!(engine.score(&[], &btc_factors()), 70);
    }

    #[test]
    fn test_unknown_factor_counts_as_average() {
        let engine = FundamentalAnalysisEngine::new();
        let rules = vec![
            FundamentalRule::new("1", "Market Cap", "", 20),
            FundamentalRule::new("2", "Community", "", 20),
        ];
        // (95 + 70) / 2 = 82.5
        assert_eq!(engine.score(&rules, &btc_factors()), 83);
    }

    #[test]
    fn test_negative_weight_is_ignored() {
        let engine = FundamentalAnalysisEngine::new();
        let rules = vec![
            FundamentalRule::new("1", "Market Cap", "", 20),
            FundamentalRule::new("2", "Tokenomics", "", -20),
        ];
        assert_eq!(engine.score(&rules, &btc_factors()), 95);

        let only_bad = vec![FundamentalRule::new("1", "Market Cap", "", -5)];
        assert_eq!(engine.score(&only_bad, &btc_factors()), 70);
    }

    #[test]
    fn test_configured_neutral_score() {
        let config = EngineConfig {
            neutral_score: 50,
            unknown_factor_score: 40.0,
            ..EngineConfig::default()
        };
        let engine = FundamentalAnalysisEngine::with_config(&config);
        assert_eq!(engine.score(&[], &btc_factors()), 50);

        let rules = vec![FundamentalRule::new("1", "Community", "", 10)];
        assert_eq!(engine.score(&rules, &btc_factors()), 40);
    }

    #[test]
    fn test_contributions_follow_rule_order() {
        let engine = FundamentalAnalysisEngine::new();
        let mut rules = preset_rules();
        rules[1].is_active = false;
        let contributions = engine.contributions(&rules, &btc_factors());
        let names: Vec<&str> = contributions.iter().map(|c| c.rule.as_str()).collect();
        assert_eq!(names, vec!["Market Cap", "Use Case", "Tokenomics"]);
        assert_eq!(contributions[0].weight, 25);
    }
}
