use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No signal data for {0} and no default asset to fall back to")]
    NoSignalData(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Analysis timed out after {0} ms")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Serialization(err.to_string())
    }
}
