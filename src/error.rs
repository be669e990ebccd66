use crewdesk_shared::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A newer load started before this one resolved; its data was discarded.
    #[error("Load {stamp} superseded by load {current}")]
    StaleLoad { stamp: u64, current: u64 },
}

impl AppError {
    pub fn is_stale(&self) -> bool {
        matches!(self, AppError::StaleLoad { .. })
    }
}
