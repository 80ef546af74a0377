use thiserror::Error;

/// Failures at the edges of the crate: reading configuration, parsing
/// user input and writing exports. The numerical core never fails.
#[derive(Debug, Error)]
pub enum AirflowError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to export summary: {0}")]
    Export(serde_json::Error),

    #[error("invalid NACA 4-digit code {0:?}")]
    InvalidNacaCode(String),
}

pub type Result<T> = std::result::Result<T, AirflowError>;
