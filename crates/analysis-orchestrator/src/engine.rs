use analysis_core::scoring::compose_scores;
use analysis_core::{
    normalize_symbol, AnalysisError, AnalysisResult, EngineConfig, RuleConfiguration, SignalProvider,
};
use fundamental_analysis::FundamentalAnalysisEngine;
use rayon::prelude::*;
use risk_manager::RiskManager;
use technical_analysis::TechnicalAnalysisEngine;

use crate::checklist::ChecklistEvaluator;
use crate::recommendations::RecommendationTable;

/// Stateless rule evaluation engine.
///
/// Scores an asset against a caller-owned `RuleConfiguration`: three category
/// scores, a fixed-weight overall score, risk-rule violations, recommendations
/// and a checklist. The engine only reads its inputs, so one instance can serve
/// concurrent requests.
pub struct RuleEvaluationEngine {
    config: EngineConfig,
    fundamental_analyzer: FundamentalAnalysisEngine,
    technical_analyzer: TechnicalAnalysisEngine,
    risk_manager: RiskManager,
    recommendations: RecommendationTable,
    checklist: ChecklistEvaluator,
}

impl Default for RuleEvaluationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RuleEvaluationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            fundamental_analyzer: FundamentalAnalysisEngine::with_config(&config),
            technical_analyzer: TechnicalAnalysisEngine::with_config(&config),
            risk_manager: RiskManager::with_config(&config),
            recommendations: RecommendationTable::default(),
            checklist: ChecklistEvaluator::new(config.checklist_mode),
            config,
        }
    }

    /// Replace the symbol-keyed advice table
    pub fn with_recommendations(mut self, recommendations: RecommendationTable) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one asset.
    ///
    /// Unknown symbols are scored with the provider's default asset. Fails only
    /// when the provider has data for neither.
    pub fn evaluate(
        &self,
        symbol: &str,
        rules: &RuleConfiguration,
        provider: &dyn SignalProvider,
    ) -> Result<AnalysisResult, AnalysisError> {
        let symbol = normalize_symbol(symbol);
        let resolved = provider.resolve(&symbol)?;
        let signals = &resolved.signals;

        let fundamental_score = self
            .fundamental_analyzer
            .score(&rules.fundamental_rules, &signals.fundamental);
        let technical_score = self
            .technical_analyzer
            .score(&rules.technical_indicators, &signals.technical);
        let risk_score = self.risk_manager.risk_score(&signals.risk);
        let overall_score = self.compose_overall(fundamental_score, technical_score, risk_score);

        // Violations and advice follow the requested symbol, not the fallback asset
        let violations = self
            .risk_manager
            .check_violations(&symbol, &rules.risk_rules)
            .iter()
            .map(|v| v.to_string())
            .collect();

        let name = if resolved.is_fallback {
            symbol.clone()
        } else {
            signals.name.clone()
        };

        tracing::debug!(
            "{}: fundamental {}, technical {}, risk {}, overall {}{}",
            symbol,
            fundamental_score,
            technical_score,
            risk_score,
            overall_score,
            if resolved.is_fallback { " (default asset data)" } else { "" }
        );

        Ok(AnalysisResult {
            recommendations: self.recommendations.for_symbol(&symbol),
            checklist: self.checklist.evaluate(&rules.checklist),
            symbol,
            name,
            fundamental_score,
            technical_score,
            risk_score,
            overall_score,
            violations,
        })
    }

    /// Evaluate several assets in parallel; output order matches `symbols`.
    pub fn evaluate_batch<S>(
        &self,
        symbols: &[S],
        rules: &RuleConfiguration,
        provider: &dyn SignalProvider,
    ) -> Vec<Result<AnalysisResult, AnalysisError>>
    where
        S: AsRef<str> + Sync,
    {
        symbols
            .par_iter()
            .map(|symbol| self.evaluate(symbol.as_ref(), rules, provider))
            .collect()
    }

    /// Overall score from the three category scores, weighted 40/40/20 by default
    pub fn compose_overall(&self, fundamental: u8, technical: u8, risk: u8) -> u8 {
        let weights = &self.config.category_weights;
        compose_scores(&[
            (fundamental, weights.fundamental),
            (technical, weights.technical),
            (risk, weights.risk),
        ])
        .unwrap_or(self.config.neutral_score)
    }
}
