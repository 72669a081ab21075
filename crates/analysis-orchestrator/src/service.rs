use analysis_core::{
    normalize_symbol, AnalysisError, AnalysisResult, AssetAnalyzer, RuleConfiguration, ServiceConfig, SignalProvider,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::RuleEvaluationEngine;

/// Internal cache entry with timestamp
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

/// Async front door for the presentation layer.
///
/// Wraps the synchronous engine with optional artificial latency, a timeout and a
/// memoization cache keyed on (symbol, rule configuration fingerprint).
pub struct AnalysisService {
    engine: Arc<RuleEvaluationEngine>,
    provider: Arc<dyn SignalProvider>,
    config: ServiceConfig,
    /// Results per "SYMBOL:fingerprint" (TTL from config)
    results_cache: DashMap<String, CacheEntry<AnalysisResult>>,
}

impl AnalysisService {
    pub fn new(engine: Arc<RuleEvaluationEngine>, provider: Arc<dyn SignalProvider>, config: ServiceConfig) -> Self {
        Self {
            engine,
            provider,
            config,
            results_cache: DashMap::new(),
        }
    }

    pub fn engine(&self) -> &RuleEvaluationEngine {
        &self.engine
    }

    /// Analyze a symbol, serving a cached result when one is still fresh
    pub async fn analyze(&self, symbol: &str, rules: &RuleConfiguration) -> Result<AnalysisResult, AnalysisError> {
        let symbol = normalize_symbol(symbol);
        let cache_key = format!("{}:{}", symbol, rules.fingerprint()?);

        if let Some(cached) = self.cached(&cache_key) {
            tracing::debug!("Serving cached analysis for {}", symbol);
            return Ok(cached);
        }

        let timeout_ms = self.config.analysis_timeout_ms;
        let evaluation = async {
            if self.config.analysis_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.analysis_delay_ms)).await;
            }
            self.engine.evaluate(&symbol, rules, self.provider.as_ref())
        };

        let result = match tokio::time::timeout(Duration::from_millis(timeout_ms), evaluation).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!("Analysis for {} timed out after {} ms", symbol, timeout_ms);
                return Err(AnalysisError::Timeout(timeout_ms));
            }
        };

        tracing::info!(
            "Analysis for {} complete: overall {} ({} violations)",
            symbol,
            result.overall_score,
            result.violations.len()
        );

        if self.config.cache_ttl_secs > 0 {
            self.results_cache.insert(
                cache_key,
                CacheEntry {
                    data: result.clone(),
                    cached_at: Utc::now(),
                },
            );
        }

        Ok(result)
    }

    /// Number of entries currently held, fresh or not
    pub fn cached_entries(&self) -> usize {
        self.results_cache.len()
    }

    /// Drop entries older than the TTL
    pub fn purge_expired(&self) {
        let ttl = self.config.cache_ttl_secs;
        self.results_cache
            .retain(|_, entry| (Utc::now() - entry.cached_at).num_seconds() < ttl);
    }

    pub fn clear_cache(&self) {
        self.results_cache.clear();
    }

    fn cached(&self, cache_key: &str) -> Option<AnalysisResult> {
        if self.config.cache_ttl_secs <= 0 {
            return None;
        }
        let entry = self.results_cache.get(cache_key)?;
        let age = (Utc::now() - entry.cached_at).num_seconds();
        if age < self.config.cache_ttl_secs {
            Some(entry.data.clone())
        } else {
            drop(entry);
            self.results_cache.remove(cache_key);
            None
        }
    }
}

#[async_trait]
impl AssetAnalyzer for AnalysisService {
    async fn analyze(&self, symbol: &str, rules: &RuleConfiguration) -> Result<AnalysisResult, AnalysisError> {
        AnalysisService::analyze(self, symbol, rules).await
    }
}
