//! Shared data models.

pub mod record;

// Re-export commonly used types
pub use record::Record;
