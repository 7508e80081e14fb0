//! Error types for the identity/session core.
//!
//! The taxonomy mirrors what callers can act on: connection failures are
//! retryable before any transaction began, constraint violations are domain
//! errors, and concurrency conflicts are surfaced distinctly so callers can
//! choose to retry. A "not found" outcome from the code exchange is *not* an
//! error and never appears here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The backing store could not be reached. Fatal at startup; during serve
    /// mode the failed operation's transaction never began and the caller may
    /// retry.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A catalog entry failed to apply. The whole batch was rolled back and
    /// nothing was committed.
    #[error("migration '{name}' failed: {source}")]
    Migration {
        name: String,
        #[source]
        source: sqlx::Error,
    },

    /// Unique or referential constraint violation (duplicate username, email,
    /// client, code, or token). Rolled back with zero partial writes.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Lock wait timeout, deadlock, or serialization failure. Distinct from a
    /// "not found" exchange result so callers can retry.
    #[error("concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("user not found")]
    UserNotFound,

    #[error("user is already archived")]
    UserAlreadyArchived,

    #[error("configuration error: {0}")]
    Config(anyhow::Error),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            if let Some(code) = db.code() {
                // Class 23: integrity constraint violations.
                if code.starts_with("23") {
                    return CoreError::ConstraintViolation(db.message().to_string());
                }
                // 55P03 lock_not_available, 40001 serialization_failure,
                // 40P01 deadlock_detected.
                if code == "55P03" || code == "40001" || code == "40P01" {
                    return CoreError::ConcurrencyConflict(db.message().to_string());
                }
            }
            return CoreError::Database(err);
        }
        match err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                CoreError::Connection(err)
            }
            other => CoreError::Database(other),
        }
    }
}
