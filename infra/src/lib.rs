//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the BidHub
//! application, following Clean Architecture principles. It provides
//! concrete implementations for persistence and outbound email delivery.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repository implementations using SQLx
//! - **Email**: Verification-mail delivery through the SendGrid Web API
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core error types for convenience
pub use bh_core::errors::{DomainError, DomainResult};

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email module - Outbound mail delivery implementations
pub mod email;

#[cfg(feature = "mysql")]
use bh_shared::config::AppConfig;
use bh_shared::config::LoggingConfig;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

/// Initialize the tracing subscriber from logging configuration
///
/// Call once at process start; later calls are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    // A second init (e.g. in tests) is fine to ignore
    let _ = result;
}

/// Connect the database pool for an application configuration
///
/// Loads `.env` if present, connects the pool, and verifies connectivity
/// before returning.
#[cfg(feature = "mysql")]
pub async fn initialize(config: &AppConfig) -> Result<database::DatabasePool, InfrastructureError> {
    dotenvy::dotenv().ok();

    tracing::info!(
        environment = %config.environment,
        "Initializing infrastructure services"
    );

    let pool = database::DatabasePool::connect(&config.database).await?;
    pool.health_check().await?;

    tracing::info!("Infrastructure services initialized");
    Ok(pool)
}
