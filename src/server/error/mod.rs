//! Error types for the premium ledger.
//!
//! This module provides the unified [`Error`] type along with specialized error types for the
//! configuration and ledger domains. All errors use `thiserror` for `Display` and `Error`
//! implementations, and external library errors convert automatically through `#[from]` so
//! the `?` operator can be used throughout services and repositories.

pub mod config;
pub mod ledger;

use thiserror::Error;

use crate::server::error::{config::ConfigError, ledger::LedgerError};

/// Main error type for the premium ledger.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Ledger errors (unrecognized frequency, missing due-date basis, run already in progress)
/// - External library errors (database, cache, cron scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Ledger domain error (policy configuration, due date arithmetic, run exclusivity).
    #[error(transparent)]
    LedgerError(#[from] LedgerError),
    /// Cache layer refused or failed an operation outside of the Redis client itself.
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),
    /// Internal error indicating a bug in the ledger's code.
    ///
    /// This error should never occur in normal operation and indicates a programming error.
    #[error("Internal error in premium ledger, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Redis/Valkey client error (connection, command execution).
    #[error(transparent)]
    RedisError(#[from] fred::error::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}
