//! Pipeline Setting Version Store
//!
//! Versioned persistence of CI pipeline settings on `SQLite`: run lock
//! policy, success and failure notification subscriptions, and queue limits,
//! one row per pipeline version.
//!
//! # Features
//!
//! - Default-seeded rows for newly created pipelines
//! - Lookups by pipeline id, id sets and project-scoped name
//! - Name and description corrections across one or all versions
//! - Duplicate-name guard for renames and saves
//! - Every data access operation runs on a caller-supplied executor
//!
//! # Quick Start
//!
//! ```ignore
//! use pipeline_setting_store::config::Config;
//! use pipeline_setting_store::storage::SqliteStorage;
//! use pipeline_setting_store::traits::PipelineSettingStore;
//!
//! let storage = SqliteStorage::from_config(&Config::from_env()?).await?;
//! storage.insert_new_setting("proj", "p-1", "Build", 1, false).await?;
//! let record = storage.get_setting("p-1", 1).await?;
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────────┐
//! │ PipelineSettingService│──▶│ PipelineSettingStore │
//! └──────────────────────┘   └──────────┬───────────┘
//!                                       │ SqliteStorage
//!                                       ▼
//!                          PipelineSettingVersionDao ──▶ SQLite
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod service;
pub mod setting;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_utils;
