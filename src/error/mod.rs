//! Error types for the pipeline setting store.
//!
//! This module defines a small error hierarchy:
//! - [`AppError`]: Top-level errors returned by the service facade
//! - [`StorageError`]: Database operation errors
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// Wraps subsystem errors for callers of
/// [`PipelineSettingService`](crate::service::PipelineSettingService).
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Another pipeline in the same project already uses the name.
    #[error("Pipeline name '{name}' already exists in project {project_id}")]
    NameConflict {
        /// Project the name is scoped to.
        project_id: String,
        /// The conflicting name.
        name: String,
    },
}

/// Storage errors.
///
/// These errors represent failures in database operations. A point lookup
/// that finds nothing is not an error; it yields `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Failed to connect to the database.
    #[error("Database connection failed: {message}")]
    ConnectionFailed {
        /// Description of the connection failure.
        message: String,
    },

    /// A database query failed.
    #[error("Query failed: {query} - {message}")]
    QueryFailed {
        /// The statement that failed.
        query: String,
        /// Description of the failure.
        message: String,
    },

    /// A statement was rejected by a table constraint, such as a duplicate
    /// `(pipeline_id, version)` key.
    #[error("Constraint violation: {query} - {message}")]
    ConstraintViolation {
        /// The statement that was rejected.
        query: String,
        /// The database's own message.
        message: String,
    },

    /// Database migration failed.
    #[error("Migration failed: {version} - {message}")]
    MigrationFailed {
        /// The migration version that failed.
        version: String,
        /// Description of the failure.
        message: String,
    },

    /// A stored value could not be decoded.
    #[error("Invalid stored data: {message}")]
    InvalidData {
        /// What could not be decoded.
        message: String,
    },
}

impl StorageError {
    /// Classify a sqlx error raised by `query`.
    ///
    /// Unique, primary key, foreign key, not-null and check violations
    /// become [`StorageError::ConstraintViolation`]; everything else is a
    /// [`StorageError::QueryFailed`].
    #[must_use]
    pub fn from_sqlx(query: &str, err: &sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = err {
            if !matches!(db_err.kind(), sqlx::error::ErrorKind::Other) {
                return Self::ConstraintViolation {
                    query: query.to_string(),
                    message: db_err.message().to_string(),
                };
            }
        }
        Self::QueryFailed {
            query: query.to_string(),
            message: err.to_string(),
        }
    }

    /// Returns true if the error came from a table constraint.
    #[must_use]
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
