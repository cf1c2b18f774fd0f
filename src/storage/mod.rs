//! Storage backend.
//!
//! This module provides:
//! - `SQLite` database implementation
//! - Pipeline setting version CRUD operations
//! - Predicate building for filtered queries
//!
//! # Architecture
//!
//! The storage layer uses `SQLite` with the `sqlx` crate for async operations.
//! DAO operations accept any executor, so the same call runs on the pool or
//! inside a caller-owned transaction.
//!
//! The implementation is split across submodules:
//! - `core`: Pool management and migrations
//! - `setting_version`: `pipeline_setting_version` operations
//! - `conditions`: Ordered `WHERE` clause builder
//! - `columns`: Comma-joined column encodings
//! - `trait_impl`: `PipelineSettingStore` implementation
//!
//! # Example
//!
//! ```ignore
//! use pipeline_setting_store::config::SettingDefaults;
//! use pipeline_setting_store::storage::SqliteStorage;
//!
//! let storage = SqliteStorage::new("./data/pipeline_settings.db", SettingDefaults::default()).await?;
//! let mut tx = storage.begin().await?;
//! storage.dao().insert_new_setting(&mut *tx, "proj", "p-1", "Build", 1, false).await?;
//! tx.commit().await?;
//! ```

mod columns;
mod conditions;
mod core;
mod setting_version;
mod trait_impl;
mod types;

pub use self::core::SqliteStorage;
pub use setting_version::PipelineSettingVersionDao;
pub use types::PipelineSettingVersionRecord;
