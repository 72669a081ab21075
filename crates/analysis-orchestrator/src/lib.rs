pub mod checklist;
pub mod engine;
pub mod provider;
pub mod recommendations;
pub mod service;

pub use checklist::{static_checklist, ChecklistEvaluator};
pub use engine::RuleEvaluationEngine;
pub use provider::{StaticSignalProvider, DEFAULT_SYMBOL};
pub use recommendations::RecommendationTable;
pub use service::AnalysisService;
