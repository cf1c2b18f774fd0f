//! Core `SQLite` storage implementation.
//!
//! This module provides the main [`SqliteStorage`] struct: pool management
//! and schema bootstrap.

#![allow(clippy::missing_errors_doc)]

use crate::config::{Config, SettingDefaults};
use crate::error::StorageError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::path::Path;
use std::str::FromStr;

use super::setting_version::PipelineSettingVersionDao;

/// `SQLite` storage backend for pipeline setting versions.
///
/// Owns a connection pool and a [`PipelineSettingVersionDao`]. Operations
/// through [`PipelineSettingStore`](crate::traits::PipelineSettingStore)
/// run on the pool; callers that need several statements in one
/// transaction use [`begin`](Self::begin) and call the DAO directly.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pub(crate) pool: SqlitePool,
    pub(crate) dao: PipelineSettingVersionDao,
}

impl SqliteStorage {
    /// Get a clone of the connection pool.
    #[must_use]
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// The DAO bound to this storage's defaults.
    #[must_use]
    pub const fn dao(&self) -> &PipelineSettingVersionDao {
        &self.dao
    }

    /// Create a new `SQLite` storage instance.
    ///
    /// # Arguments
    ///
    /// * `database_path` - Path to the `SQLite` database file
    /// * `defaults` - Seed values for new pipelines
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new(
        database_path: impl AsRef<Path>,
        defaults: SettingDefaults,
    ) -> Result<Self, StorageError> {
        let path = database_path.as_ref();

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
                .map_err(|e| StorageError::ConnectionFailed {
                    message: format!("Invalid database path: {e}"),
                })?
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to connect to database: {e}"),
            })?;

        let storage = Self {
            pool,
            dao: PipelineSettingVersionDao::new(defaults),
        };
        storage.run_migrations().await?;

        tracing::info!(path = %path.display(), "Pipeline setting storage opened");
        Ok(storage)
    }

    /// Create a storage instance from loaded configuration.
    pub async fn from_config(config: &Config) -> Result<Self, StorageError> {
        Self::new(&config.database_path, config.defaults.clone()).await
    }

    /// Create a new in-memory `SQLite` storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new_in_memory(defaults: SettingDefaults) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Invalid memory database options: {e}"),
            })?
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to create in-memory database: {e}"),
            })?;

        let storage = Self {
            pool,
            dao: PipelineSettingVersionDao::new(defaults),
        };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Begin a transaction on the pool.
    ///
    /// Pass `&mut *tx` to the [`dao`](Self::dao) operations, then commit or
    /// roll back.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, StorageError> {
        self.pool
            .begin()
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                message: format!("Failed to begin transaction: {e}"),
            })
    }

    /// Run database migrations.
    ///
    /// Each migration is idempotent (uses IF NOT EXISTS).
    pub(crate) async fn run_migrations(&self) -> Result<(), StorageError> {
        // Migration 001: pipeline_setting_version table
        let schema_001 = include_str!("../../migrations/001_pipeline_setting_version.sql");
        sqlx::query(schema_001)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed {
                version: "001".to_string(),
                message: format!("Failed to run migration 001: {e}"),
            })?;

        tracing::debug!("Pipeline setting migrations applied");
        Ok(())
    }
}
