use analysis_core::{MacdTrend, TechnicalSignals};

/// RSI readings strictly between these bounds are outside the oversold/overbought zones
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

pub const RSI_NEUTRAL_ZONE_SCORE: f64 = 80.0;
pub const RSI_EXTREME_ZONE_SCORE: f64 = 60.0;
pub const MACD_BULLISH_SCORE: f64 = 85.0;
pub const MACD_NOT_BULLISH_SCORE: f64 = 45.0;
/// Flat signal strength for indicators without a translation rule
pub const PLACEHOLDER_SCORE: f64 = 70.0;

/// Indicators with a dedicated translation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Rsi,
    Macd,
    Other,
}

impl IndicatorKind {
    /// Case-insensitive match on the indicator's display name
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("RSI") {
            IndicatorKind::Rsi
        } else if name.eq_ignore_ascii_case("MACD") {
            IndicatorKind::Macd
        } else {
            IndicatorKind::Other
        }
    }
}

/// 80 when 30 < rsi < 70 (both bounds exclusive), otherwise 60
pub fn rsi_contribution(rsi: f64) -> f64 {
    if rsi > RSI_OVERSOLD && rsi < RSI_OVERBOUGHT {
        RSI_NEUTRAL_ZONE_SCORE
    } else {
        RSI_EXTREME_ZONE_SCORE
    }
}

pub fn macd_contribution(trend: MacdTrend) -> f64 {
    match trend {
        MacdTrend::Bullish => MACD_BULLISH_SCORE,
        MacdTrend::Bearish => MACD_NOT_BULLISH_SCORE,
    }
}

/// Translate a raw reading into a 0-100 contribution.
///
/// `unknown` is used when the snapshot has no reading for an RSI or MACD rule.
pub fn indicator_contribution(kind: IndicatorKind, signals: &TechnicalSignals, unknown: f64) -> f64 {
    match kind {
        IndicatorKind::Rsi => signals.rsi.map(rsi_contribution).unwrap_or(unknown),
        IndicatorKind::Macd => signals.macd.map(macd_contribution).unwrap_or(unknown),
        IndicatorKind::Other => PLACEHOLDER_SCORE,
    }
}
