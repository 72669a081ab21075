use crate::{
    AnalysisError, ChecklistCategory, FundamentalRule, InvestmentChecklistItem, RiskRule, TechnicalIndicator,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

pub const MIN_RULE_WEIGHT: i32 = 5;
pub const MAX_RULE_WEIGHT: i32 = 50;
pub const MIN_ALLOCATION: u32 = 1;
pub const MAX_ALLOCATION: u32 = 100;

/// A user's complete formula set. Owned by the caller, borrowed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfiguration {
    #[serde(default)]
    pub fundamental_rules: Vec<FundamentalRule>,
    #[serde(default)]
    pub technical_indicators: Vec<TechnicalIndicator>,
    #[serde(default)]
    pub risk_rules: Vec<RiskRule>,
    #[serde(default)]
    pub checklist: Vec<InvestmentChecklistItem>,
}

impl Default for RuleConfiguration {
    /// The preset formulas a new user starts with
    fn default() -> Self {
        Self {
            fundamental_rules: vec![
                FundamentalRule::new("1", "Market Cap", "Only coins with market cap above $1B", 25),
                FundamentalRule::new(
                    "2",
                    "Team & Development",
                    "Experienced team, active GitHub, clear roadmap",
                    30,
                ),
                FundamentalRule::new("3", "Use Case", "Real utility solving a concrete problem", 25),
                FundamentalRule::new("4", "Tokenomics", "Reasonable supply, no large unlocks ahead", 20),
            ],
            technical_indicators: vec![
                TechnicalIndicator::new("1", "RSI", "RSI < 30 (oversold)", 20),
                TechnicalIndicator::new("2", "MACD", "MACD crosses above signal line", 25),
                TechnicalIndicator::new("3", "Support/Resistance", "Price bounces off strong support", 30),
                TechnicalIndicator::new("4", "Volume", "Volume rises on breakout", 25),
            ],
            risk_rules: vec![
                RiskRule::new("1", "Single Coin Limit", "Never more than 20% in one coin", 20),
                RiskRule::new("2", "Altcoin Limit", "Altcoins no more than 60% in total", 60),
                RiskRule::new("3", "Memecoin Limit", "Memecoins no more than 5%", 5),
                RiskRule::new("4", "Stop Loss", "Always set a -15% stop loss", 15),
            ],
            checklist: vec![
                InvestmentChecklistItem::new("1", ChecklistCategory::Research, "Read the whitepaper", true),
                InvestmentChecklistItem::new("2", ChecklistCategory::Research, "Check team & advisors", true),
                InvestmentChecklistItem::new("3", ChecklistCategory::Research, "Analyze competitors", false),
                InvestmentChecklistItem::new("4", ChecklistCategory::Entry, "Define entry point", true),
                InvestmentChecklistItem::new("5", ChecklistCategory::Entry, "Calculate position size", true),
                InvestmentChecklistItem::new("6", ChecklistCategory::Exit, "Set take-profit levels", true),
                InvestmentChecklistItem::new("7", ChecklistCategory::Exit, "Set stop loss", true),
                InvestmentChecklistItem::new("8", ChecklistCategory::Risk, "Check correlation with BTC", false),
            ],
        }
    }
}

impl RuleConfiguration {
    /// Configuration with no rules at all
    pub fn empty() -> Self {
        Self {
            fundamental_rules: Vec::new(),
            technical_indicators: Vec::new(),
            risk_rules: Vec::new(),
            checklist: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Edit-time validation. Evaluation never calls this; it tolerates bad rules.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        check_unique(
            "fundamental rule",
            self.fundamental_rules.iter().map(|r| (r.id.as_str(), r.name.as_str())),
        )?;
        check_unique(
            "technical indicator",
            self.technical_indicators.iter().map(|r| (r.id.as_str(), r.name.as_str())),
        )?;
        check_unique(
            "risk rule",
            self.risk_rules.iter().map(|r| (r.id.as_str(), r.name.as_str())),
        )?;

        for rule in &self.fundamental_rules {
            check_weight("fundamental rule", &rule.name, rule.weight)?;
        }
        for indicator in &self.technical_indicators {
            check_weight("technical indicator", &indicator.name, indicator.weight)?;
        }
        for rule in &self.risk_rules {
            if !(MIN_ALLOCATION..=MAX_ALLOCATION).contains(&rule.max_allocation) {
                return Err(AnalysisError::InvalidRule(format!(
                    "risk rule '{}' max allocation {}% outside {}-{}%",
                    rule.name, rule.max_allocation, MIN_ALLOCATION, MAX_ALLOCATION
                )));
            }
        }

        Ok(())
    }

    /// Stable hex SHA-256 of the JSON form, used as a memoization key
    pub fn fingerprint(&self) -> Result<String, AnalysisError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

fn check_weight(kind: &str, name: &str, weight: i32) -> Result<(), AnalysisError> {
    if (MIN_RULE_WEIGHT..=MAX_RULE_WEIGHT).contains(&weight) {
        Ok(())
    } else {
        Err(AnalysisError::InvalidRule(format!(
            "{} '{}' weight {}% outside {}-{}%",
            kind, name, weight, MIN_RULE_WEIGHT, MAX_RULE_WEIGHT
        )))
    }
}

fn check_unique<'a, I>(kind: &str, entries: I) -> Result<(), AnalysisError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for (id, name) in entries {
        if !ids.insert(id) {
            return Err(AnalysisError::InvalidRule(format!("duplicate {} id '{}'", kind, id)));
        }
        if !names.insert(name) {
            return Err(AnalysisError::InvalidRule(format!("duplicate {} name '{}'", kind, name)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RiskRuleKind;

    #[test]
    fn test_default_presets_are_valid() {
        let config = RuleConfiguration::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fundamental_rules.len(), 4);
        assert_eq!(config.technical_indicators.len(), 4);
        assert_eq!(config.risk_rules[0].kind, RiskRuleKind::SingleCoinLimit);
        assert_eq!(config.risk_rules[2].kind, RiskRuleKind::MemecoinLimit);
        assert_eq!(config.risk_rules[3].kind, RiskRuleKind::Custom("Stop Loss".to_string()));
        assert_eq!(config.checklist.iter().filter(|c| c.is_required).count(), 6);
    }

    #[test]
    fn test_validate_rejects_out_of_range_weight() {
        let mut config = RuleConfiguration::default();
        config.fundamental_rules[0].weight = 60;
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidRule(_))));

        let mut config = RuleConfiguration::default();
        config.technical_indicators[1].weight = -5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_allocation() {
        let mut config = RuleConfiguration::default();
        config.risk_rules[1].max_allocation = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let mut config = RuleConfiguration::default();
        config.fundamental_rules[1].name = "Market Cap".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate fundamental rule name"));
    }

    #[test]
    fn test_names_only_unique_within_a_set() {
        let mut config = RuleConfiguration::default();
        config.technical_indicators[0].name = "Market Cap".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let config = RuleConfiguration::default();
        let a = config.fingerprint().unwrap();
        let b = config.clone().fingerprint().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let mut toggled = config.clone();
        toggled.risk_rules[2].is_active = false;
        assert_ne!(a, toggled.fingerprint().unwrap());
    }

    #[test]
    fn test_from_json_derives_risk_kind_from_name() {
        let json = r#"{
            "risk_rules": [
                {"id": "1", "name": "Memecoin Limit", "max_allocation": 5, "is_active": true},
                {"id": "2", "name": "Renamed cap", "max_allocation": 12, "is_active": true,
                 "kind": {"type": "single_coin_limit"}}
            ]
        }"#;
        let config = RuleConfiguration::from_json(json).unwrap();
        assert!(config.fundamental_rules.is_empty());
        assert_eq!(config.risk_rules[0].kind, RiskRuleKind::MemecoinLimit);
        assert_eq!(config.risk_rules[1].kind, RiskRuleKind::SingleCoinLimit);
        assert_eq!(config.risk_rules[0].description, "");
    }

    #[test]
    fn test_json_round_trip_keeps_custom_kind() {
        let config = RuleConfiguration::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = RuleConfiguration::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
