pub mod config;
pub mod error;
pub mod rules;
pub mod scoring;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use rules::*;
pub use traits::*;
pub use types::*;
