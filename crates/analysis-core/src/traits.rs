use async_trait::async_trait;
use crate::{normalize_symbol, AnalysisError, AnalysisResult, AssetSignals, ResolvedSignals, RuleConfiguration};

/// Source of per-asset signal snapshots (static table today, market feed later)
pub trait SignalProvider: Send + Sync {
    /// Symbol whose data stands in for unknown symbols
    fn default_symbol(&self) -> &str;

    /// Snapshot for an exact (normalized) symbol, if known
    fn signals(&self, symbol: &str) -> Option<AssetSignals>;

    /// Snapshot for `symbol`, falling back to the default asset when unknown.
    fn resolve(&self, symbol: &str) -> Result<ResolvedSignals, AnalysisError> {
        let symbol = normalize_symbol(symbol);
        if let Some(signals) = self.signals(&symbol) {
            return Ok(ResolvedSignals {
                signals,
                is_fallback: false,
            });
        }

        let default_symbol = normalize_symbol(self.default_symbol());
        tracing::debug!("No signals for {}, falling back to {}", symbol, default_symbol);
        self.signals(&default_symbol)
            .map(|signals| ResolvedSignals {
                signals,
                is_fallback: true,
            })
            .ok_or(AnalysisError::NoSignalData(symbol))
    }
}

/// Trait for asynchronous analysis front-ends (chat UI, coin detail panel)
#[async_trait]
pub trait AssetAnalyzer: Send + Sync {
    async fn analyze(&self, symbol: &str, rules: &RuleConfiguration) -> Result<AnalysisResult, AnalysisError>;
}
