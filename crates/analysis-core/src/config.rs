use crate::scoring::{NEUTRAL_SCORE, UNKNOWN_FACTOR_SCORE};
use crate::{normalize_symbol, AnalysisError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// How the checklist section of a result is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistMode {
    /// Fixed demonstration table, independent of asset and configuration
    #[default]
    Static,
    /// Derived from the configuration's investment checklist items
    Configured,
}

impl FromStr for ChecklistMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(ChecklistMode::Static),
            "configured" => Ok(ChecklistMode::Configured),
            other => Err(AnalysisError::Config(format!("unknown checklist mode '{}'", other))),
        }
    }
}

/// Inter-category weights for the overall score (percent, normalized by their sum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub fundamental: u32,
    pub technical: u32,
    pub risk: u32,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            fundamental: 40,
            technical: 40,
            risk: 20,
        }
    }
}

impl FromStr for CategoryWeights {
    type Err = AnalysisError;

    /// Parses "fundamental,technical,risk", e.g. "40,40,20"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AnalysisError::Config(format!("invalid category weights '{}': {}", s, e)))?;

        match parts.as_slice() {
            [fundamental, technical, risk] if fundamental + technical + risk > 0 => Ok(Self {
                fundamental: *fundamental,
                technical: *technical,
                risk: *risk,
            }),
            _ => Err(AnalysisError::Config(format!(
                "category weights need three values with a positive sum, got '{}'",
                s
            ))),
        }
    }
}

/// Scoring constants for the rule evaluation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Category score when no rule in the category is active (70)
    pub neutral_score: u8,
    /// Contribution of a rule whose factor is missing from the snapshot (70)
    pub unknown_factor_score: f64,
    pub category_weights: CategoryWeights,
    /// A "Single Coin Limit" configured below this percentage is flagged (15)
    pub single_coin_threshold: u32,
    /// Symbols treated as memecoins (DOGE, SHIB)
    pub memecoins: BTreeSet<String>,
    pub checklist_mode: ChecklistMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neutral_score: NEUTRAL_SCORE,
            unknown_factor_score: UNKNOWN_FACTOR_SCORE,
            category_weights: CategoryWeights::default(),
            single_coin_threshold: 15,
            memecoins: ["DOGE", "SHIB"].iter().map(|s| s.to_string()).collect(),
            checklist_mode: ChecklistMode::Static,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let neutral_score: u8 = parse_or(&lookup, "ENGINE_NEUTRAL_SCORE", defaults.neutral_score)?;
        if neutral_score > 100 {
            return Err(AnalysisError::Config(format!(
                "ENGINE_NEUTRAL_SCORE must be within 0-100, got {}",
                neutral_score
            )));
        }

        let unknown_factor_score: f64 =
            parse_or(&lookup, "ENGINE_UNKNOWN_FACTOR_SCORE", defaults.unknown_factor_score)?;
        if !(0.0..=100.0).contains(&unknown_factor_score) {
            return Err(AnalysisError::Config(format!(
                "ENGINE_UNKNOWN_FACTOR_SCORE must be within 0-100, got {}",
                unknown_factor_score
            )));
        }

        let memecoins = match lookup("ENGINE_MEMECOINS") {
            Some(raw) => raw
                .split(',')
                .map(normalize_symbol)
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.memecoins,
        };

        Ok(Self {
            neutral_score,
            unknown_factor_score,
            category_weights: parse_or(&lookup, "ENGINE_CATEGORY_WEIGHTS", defaults.category_weights)?,
            single_coin_threshold: parse_or(
                &lookup,
                "ENGINE_SINGLE_COIN_THRESHOLD",
                defaults.single_coin_threshold,
            )?,
            memecoins,
            checklist_mode: parse_or(&lookup, "ENGINE_CHECKLIST_MODE", defaults.checklist_mode)?,
        })
    }

    pub fn is_memecoin(&self, symbol: &str) -> bool {
        self.memecoins.contains(&normalize_symbol(symbol))
    }
}

/// Settings for the async analysis service wrapped around the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Artificial latency before each evaluation, 0 disables
    pub analysis_delay_ms: u64,
    pub analysis_timeout_ms: u64,
    /// Memoization TTL, 0 disables the cache
    pub cache_ttl_secs: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: 0,
            analysis_timeout_ms: 5_000,
            cache_ttl_secs: 300,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            analysis_delay_ms: parse_or(&lookup, "ANALYSIS_DELAY_MS", defaults.analysis_delay_ms)?,
            analysis_timeout_ms: parse_or(&lookup, "ANALYSIS_TIMEOUT_MS", defaults.analysis_timeout_ms)?,
            cache_ttl_secs: parse_or(&lookup, "ANALYSIS_CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
        };

        if config.analysis_timeout_ms == 0 {
            return Err(AnalysisError::Config("ANALYSIS_TIMEOUT_MS must be positive".to_string()));
        }
        if config.cache_ttl_secs < 0 {
            return Err(AnalysisError::Config("ANALYSIS_CACHE_TTL_SECS cannot be negative".to_string()));
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AnalysisError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AnalysisError::Config(format!("{}='{}': {}", key, raw, e))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.neutral_score, 70);
        assert_eq!(config.category_weights, CategoryWeights { fundamental: 40, technical: 40, risk: 20 });
        assert!(config.is_memecoin("doge"));
        assert!(!config.is_memecoin("BTC"));
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("ENGINE_CATEGORY_WEIGHTS", "50, 30, 20"),
            ("ENGINE_MEMECOINS", "doge, pepe,"),
            ("ENGINE_SINGLE_COIN_THRESHOLD", "10"),
            ("ENGINE_CHECKLIST_MODE", "Configured"),
        ]))
        .unwrap();

        assert_eq!(config.category_weights.fundamental, 50);
        assert_eq!(config.single_coin_threshold, 10);
        assert_eq!(config.checklist_mode, ChecklistMode::Configured);
        assert!(config.is_memecoin("PEPE"));
        assert!(!config.is_memecoin("SHIB"));
        assert_eq!(config.memecoins.len(), 2);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(EngineConfig::from_lookup(lookup_from(&[("ENGINE_CATEGORY_WEIGHTS", "40,40")])).is_err());
        assert!(EngineConfig::from_lookup(lookup_from(&[("ENGINE_CATEGORY_WEIGHTS", "0,0,0")])).is_err());
        assert!(EngineConfig::from_lookup(lookup_from(&[("ENGINE_NEUTRAL_SCORE", "140")])).is_err());
        assert!(EngineConfig::from_lookup(lookup_from(&[("ENGINE_CHECKLIST_MODE", "dynamic")])).is_err());
        assert!(ServiceConfig::from_lookup(lookup_from(&[("ANALYSIS_TIMEOUT_MS", "0")])).is_err());
        assert!(ServiceConfig::from_lookup(lookup_from(&[("ANALYSIS_DELAY_MS", "soon")])).is_err());
    }

    #[test]
    fn test_service_defaults() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.analysis_delay_ms, 0);
        assert_eq!(config.analysis_timeout_ms, 5_000);
        assert_eq!(config.cache_ttl_secs, 300);
    }
}
