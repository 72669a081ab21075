use analysis_core::normalize_symbol;
use std::collections::HashMap;

/// Advisory text keyed by symbol. Symbols without an entry get no recommendations.
#[derive(Debug, Clone)]
pub struct RecommendationTable {
    entries: HashMap<String, Vec<String>>,
}

impl Default for RecommendationTable {
    fn default() -> Self {
        Self::empty()
            .with_entry(
                "BTC",
                &[
                    "Suitable for long-term DCA under your rules",
                    "Allocation could be raised to 25-30% based on your risk rules",
                ],
            )
            .with_entry(
                "ETH",
                &[
                    "Mixed technical signals, wait for a clear breakout",
                    "Strong fundamentals, suitable for a long-term hold",
                ],
            )
    }
}

impl RecommendationTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace the advice for a symbol
    pub fn with_entry(mut self, symbol: &str, advice: &[&str]) -> Self {
        self.entries.insert(
            normalize_symbol(symbol),
            advice.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn for_symbol(&self, symbol: &str) -> Vec<String> {
        self.entries
            .get(&normalize_symbol(symbol))
            .cloned()
            .unwrap_or_default()
    }
}
