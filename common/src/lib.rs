//! Shared building blocks for the MongoDB reader.
//!
//! - `config`: connection settings loaded from the environment or `.env`
//! - `errors`: the workspace error type
//! - `models`: the schema-less record model

pub mod config;
pub mod errors;
pub mod models;

pub use config::AppConfig;
pub use errors::{AppError, AppResult};
pub use models::Record;
