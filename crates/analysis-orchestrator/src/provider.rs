//! Fixed market table standing in for a live data feed.

use analysis_core::{
    normalize_symbol, AnalysisError, AssetSignals, MacdTrend, RiskFactors, SignalProvider, TechnicalSignals,
};
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_SYMBOL: &str = "BTC";

/// In-memory `SignalProvider` keyed by normalized symbol
#[derive(Debug, Clone)]
pub struct StaticSignalProvider {
    default_symbol: String,
    assets: HashMap<String, AssetSignals>,
}

impl Default for StaticSignalProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL)
            .with_asset(bitcoin())
            .with_asset(ethereum())
    }
}

impl StaticSignalProvider {
    /// Empty table whose unknown-symbol fallback is `default_symbol`
    pub fn new(default_symbol: &str) -> Self {
        Self {
            default_symbol: normalize_symbol(default_symbol),
            assets: HashMap::new(),
        }
    }

    pub fn with_asset(mut self, mut asset: AssetSignals) -> Self {
        asset.symbol = normalize_symbol(&asset.symbol);
        self.assets.insert(asset.symbol.clone(), asset);
        self
    }

    /// Load a JSON array of `AssetSignals`
    pub fn from_json(default_symbol: &str, json: &str) -> Result<Self, AnalysisError> {
        let assets: Vec<AssetSignals> = serde_json::from_str(json)?;
        Ok(assets
            .into_iter()
            .fold(Self::new(default_symbol), |provider, asset| provider.with_asset(asset)))
    }

    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.assets.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

impl SignalProvider for StaticSignalProvider {
    fn default_symbol(&self) -> &str {
        &self.default_symbol
    }

    fn signals(&self, symbol: &str) -> Option<AssetSignals> {
        self.assets.get(&normalize_symbol(symbol)).cloned()
    }
}

fn factors(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn observations(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn bitcoin() -> AssetSignals {
    AssetSignals {
        symbol: "BTC".to_string(),
        name: "Bitcoin".to_string(),
        fundamental: factors(&[
            ("Market Cap", 95.0),
            ("Team & Development", 90.0),
            ("Use Case", 85.0),
            ("Tokenomics", 80.0),
        ]),
        technical: TechnicalSignals {
            rsi: Some(65.0),
            macd: Some(MacdTrend::Bullish),
            observations: observations(&[("Support/Resistance", "strong support"), ("Volume", "increasing")]),
        },
        risk: RiskFactors {
            volatility: 0.6,
            correlation: 0.8,
            liquidity: 0.9,
        },
    }
}

fn ethereum() -> AssetSignals {
    AssetSignals {
        symbol: "ETH".to_string(),
        name: "Ethereum".to_string(),
        fundamental: factors(&[
            ("Market Cap", 90.0),
            ("Team & Development", 95.0),
            ("Use Case", 90.0),
            ("Tokenomics", 85.0),
        ]),
        technical: TechnicalSignals {
            rsi: Some(45.0),
            macd: Some(MacdTrend::Bearish),
            observations: observations(&[("Support/Resistance", "near resistance"), ("Volume", "decreasing")]),
        },
        risk: RiskFactors {
            volatility: 0.7,
            correlation: 0.7,
            liquidity: 0.85,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let provider = StaticSignalProvider::default();
        assert_eq!(provider.default_symbol(), "BTC");
        assert_eq!(provider.symbols(), vec!["BTC".to_string(), "ETH".to_string()]);
        assert_eq!(provider.signals("eth").map(|s| s.name), Some("Ethereum".to_string()));
        assert!(provider.signals("DOGE").is_none());
    }

    #[test]
    fn test_unknown_symbol_resolves_to_default() {
        let provider = StaticSignalProvider::default();
        let resolved = provider.resolve("XXXX").unwrap();
        assert!(resolved.is_fallback);
        assert_eq!(resolved.signals.symbol, "BTC");
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{
            "symbol": "sol",
            "name": "Solana",
            "fundamental": {"Market Cap": 80.0},
            "technical": {"rsi": 72.5},
            "risk": {"volatility": 0.4, "correlation": 0.6, "liquidity": 0.7}
        }]"#;
        let provider = StaticSignalProvider::from_json("SOL", json).unwrap();
        let sol = provider.signals("SOL").unwrap();
        assert_eq!(sol.technical.rsi, Some(72.5));
        assert_eq!(sol.technical.macd, None);
        assert!(provider.resolve("ADA").unwrap().is_fallback);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = StaticSignalProvider::from_json("BTC", "{not json").unwrap_err();
        assert!(matches!(err, AnalysisError::Serialization(_)));
    }
}
