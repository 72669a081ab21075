use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fundamental analysis rule (e.g. "Market Cap", weight 25%)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalRule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Percentage weight; valid range is 5-50 but not enforced at evaluation time
    pub weight: i32,
    pub is_active: bool,
}

impl FundamentalRule {
    pub fn new(id: &str, name: &str, description: &str, weight: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            weight,
            is_active: true,
        }
    }
}

/// Direction a technical indicator is configured to signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorType {
    #[default]
    Buy,
    Sell,
    Neutral,
}

impl std::fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorType::Buy => write!(f, "buy"),
            IndicatorType::Sell => write!(f, "sell"),
            IndicatorType::Neutral => write!(f, "neutral"),
        }
    }
}

/// Technical indicator rule. `condition` is descriptive text only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicator {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub indicator_type: IndicatorType,
    #[serde(default)]
    pub condition: String,
    pub weight: i32,
    pub is_active: bool,
}

impl TechnicalIndicator {
    pub fn new(id: &str, name: &str, condition: &str, weight: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            indicator_type: IndicatorType::Buy,
            condition: condition.to_string(),
            weight,
            is_active: true,
        }
    }
}

/// What a risk rule guards against.
///
/// Violation checks dispatch on this instead of the display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "label", rename_all = "snake_case")]
pub enum RiskRuleKind {
    SingleCoinLimit,
    AltcoinLimit,
    MemecoinLimit,
    Custom(String),
}

impl RiskRuleKind {
    /// Map a display name onto a kind. Exact match, anything else is `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Single Coin Limit" => RiskRuleKind::SingleCoinLimit,
            "Altcoin Limit" => RiskRuleKind::AltcoinLimit,
            "Memecoin Limit" => RiskRuleKind::MemecoinLimit,
            other => RiskRuleKind::Custom(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RiskRuleKind::SingleCoinLimit => "Single Coin Limit",
            RiskRuleKind::AltcoinLimit => "Altcoin Limit",
            RiskRuleKind::MemecoinLimit => "Memecoin Limit",
            RiskRuleKind::Custom(label) => label,
        }
    }
}

/// Risk management rule. Carries an allocation cap instead of a weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RiskRuleRecord")]
pub struct RiskRule {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Percentage cap, 1-100
    pub max_allocation: u32,
    pub is_active: bool,
    pub kind: RiskRuleKind,
}

impl RiskRule {
    /// Build a rule whose kind is derived from its name
    pub fn new(id: &str, name: &str, description: &str, max_allocation: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            max_allocation,
            is_active: true,
            kind: RiskRuleKind::from_name(name),
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Wire shape for risk rules; `kind` may be omitted by older configurations.
#[derive(Deserialize)]
struct RiskRuleRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    max_allocation: u32,
    is_active: bool,
    #[serde(default)]
    kind: Option<RiskRuleKind>,
}

impl From<RiskRuleRecord> for RiskRule {
    fn from(record: RiskRuleRecord) -> Self {
        let kind = record
            .kind
            .unwrap_or_else(|| RiskRuleKind::from_name(&record.name));
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            max_allocation: record.max_allocation,
            is_active: record.is_active,
            kind,
        }
    }
}

/// Phase of the investment process a checklist item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistCategory {
    Research,
    Entry,
    Exit,
    Risk,
}

/// User-configured due-diligence item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentChecklistItem {
    pub id: String,
    pub category: ChecklistCategory,
    pub item: String,
    pub is_required: bool,
    #[serde(default)]
    pub completed: bool,
}

impl InvestmentChecklistItem {
    pub fn new(id: &str, category: ChecklistCategory, item: &str, is_required: bool) -> Self {
        Self {
            id: id.to_string(),
            category,
            item: item.to_string(),
            is_required,
            completed: false,
        }
    }
}

/// MACD trend reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdTrend {
    Bullish,
    Bearish,
}

/// Raw technical readings for one asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSignals {
    #[serde(default)]
    pub rsi: Option<f64>,
    #[serde(default)]
    pub macd: Option<MacdTrend>,
    /// Free-form readings such as "Volume" => "increasing". Not scored.
    #[serde(default)]
    pub observations: BTreeMap<String, String>,
}

/// Risk factor triple, each in [0, 1], higher is safer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub volatility: f64,
    pub correlation: f64,
    pub liquidity: f64,
}

/// Per-asset signal snapshot served by a `SignalProvider`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSignals {
    pub symbol: String,
    pub name: String,
    /// Factor name => score (0-100), keyed by fundamental rule name
    pub fundamental: BTreeMap<String, f64>,
    pub technical: TechnicalSignals,
    pub risk: RiskFactors,
}

/// Signals resolved for a requested symbol
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSignals {
    pub signals: AssetSignals,
    /// True when the requested symbol was unknown and the default asset was used
    pub is_fallback: bool,
}

/// One active rule's input to a category score, kept for audit logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: String,
    pub weight: u32,
    pub contribution: f64,
}

/// Checklist status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistStatus {
    Pass,
    Fail,
    Warning,
}

impl std::fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecklistStatus::Pass => write!(f, "pass"),
            ChecklistStatus::Fail => write!(f, "fail"),
            ChecklistStatus::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub item: String,
    pub status: ChecklistStatus,
}

impl ChecklistEntry {
    pub fn new(item: &str, status: ChecklistStatus) -> Self {
        Self {
            item: item.to_string(),
            status,
        }
    }
}

/// Evaluation output. Created fresh per request, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub name: String,
    pub fundamental_score: u8,
    pub technical_score: u8,
    pub risk_score: u8,
    pub overall_score: u8,
    pub violations: Vec<String>,
    pub recommendations: Vec<String>,
    pub checklist: Vec<ChecklistEntry>,
}

/// Normalize a user-supplied ticker for lookups ("  btc " => "BTC")
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
