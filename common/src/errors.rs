//! Application error types.
//!
//! Every layer returns [`AppResult`]; only the binary entry point decides
//! whether an error terminates the process.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised while loading configuration, connecting or fetching.
#[derive(Debug, Error)]
pub enum AppError {
    /// The settings source could not be read.
    #[error("error loading configuration: {0}")]
    Config(String),

    /// A configuration value failed validation (e.g. an empty URI).
    #[error("invalid configuration: {0}")]
    Validation(String),

    /// The client could not be created from the connection URI.
    #[error("error connecting to MongoDB: {0}")]
    DatabaseConnection(String),

    /// The server did not answer the liveness check.
    #[error("failed to ping MongoDB server: {0}")]
    Liveness(String),

    /// The find command could not be issued.
    #[error("error finding documents: {0}")]
    Query(String),

    /// A single document could not be decoded.
    #[error("error decoding document {index}: {message}")]
    Decode { index: usize, message: String },

    /// The cursor failed while fetching further batches.
    #[error("cursor error: {0}")]
    Cursor(String),
}

impl AppError {
    /// Stable code for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DatabaseConnection(_) => "CONNECTION_ERROR",
            AppError::Liveness(_) => "PING_FAILED",
            AppError::Query(_) => "QUERY_ERROR",
            AppError::Decode { .. } => "DECODE_ERROR",
            AppError::Cursor(_) => "CURSOR_ERROR",
        }
    }
}
