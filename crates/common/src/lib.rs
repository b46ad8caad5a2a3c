//! Movies Catalog Common Library
//!
//! Shared code for the catalog services including:
//! - Configuration management
//! - Error types and handling
//! - Metrics and observability
//! - Database models, schema and write-path repository
//! - The catalog query core (aggregation, pagination, serialization)

pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use catalog::MovieCatalog;
pub use config::AppConfig;
pub use db::{DbPool, Repository};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
