pub mod manager;
pub mod models;

pub use manager::RiskManager;
pub use models::*;
