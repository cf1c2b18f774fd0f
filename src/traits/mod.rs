//! Trait definitions for mockable dependencies.
//!
//! This module defines [`PipelineSettingStore`], the async seam between
//! callers and the database.
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates a mock implementation automatically for testing.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::setting::PipelineSetting;
use crate::storage::PipelineSettingVersionRecord;

/// Pipeline setting version store.
///
/// Each method is a single statement against the backing store. Missing
/// rows are reported as `None` or an empty result, never as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PipelineSettingStore: Send + Sync {
    /// Insert the default settings of a newly created pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConstraintViolation`] if the version exists.
    async fn insert_new_setting(
        &self,
        project_id: &str,
        pipeline_id: &str,
        pipeline_name: &str,
        version: i32,
        is_template: bool,
    ) -> Result<u64, StorageError>;

    /// Insert a version built from a caller-supplied setting.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConstraintViolation`] if the version exists.
    async fn save_setting(
        &self,
        setting: &PipelineSetting,
        version: i32,
        is_template: bool,
    ) -> Result<u64, StorageError>;

    /// Get one version of a pipeline's settings.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn get_setting(
        &self,
        pipeline_id: &str,
        version: i32,
    ) -> Result<Option<PipelineSettingVersionRecord>, StorageError>;

    /// Get every version of the given pipelines.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn get_settings(
        &self,
        pipeline_ids: &HashSet<String>,
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError>;

    /// Get every version of the given pipelines; `pipeline_ids` may repeat.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn get_settings_in(
        &self,
        pipeline_ids: &[String],
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError>;

    /// Rows sharing `name` in a project, optionally excluding one pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn get_settings_by_name(
        &self,
        project_id: &str,
        name: &str,
        exclude_pipeline_id: Option<String>,
        is_template: bool,
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError>;

    /// Rename every version of the listed pipelines.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn update_setting_name(
        &self,
        pipeline_ids: &[String],
        name: &str,
    ) -> Result<(), StorageError>;

    /// Set name and description on every version of a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn update_setting(
        &self,
        pipeline_id: &str,
        name: &str,
        desc: &str,
    ) -> Result<(), StorageError>;

    /// Set name and description on one version of a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn update_setting_version(
        &self,
        pipeline_id: &str,
        version: i32,
        name: &str,
        desc: &str,
    ) -> Result<(), StorageError>;

    /// Count rows sharing `name` in a project, excluding `pipeline_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn count_settings_by_name(
        &self,
        name: &str,
        project_id: &str,
        pipeline_id: &str,
        is_template: bool,
    ) -> Result<i64, StorageError>;

    /// Delete every version of a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn delete(&self, pipeline_id: &str) -> Result<u64, StorageError>;
}
