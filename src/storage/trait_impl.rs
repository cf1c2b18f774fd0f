//! `PipelineSettingStore` implementation for `SqliteStorage`.

#![allow(clippy::missing_errors_doc)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::setting::PipelineSetting;
use crate::traits::PipelineSettingStore;

use super::core::SqliteStorage;
use super::types::PipelineSettingVersionRecord;

#[async_trait]
impl PipelineSettingStore for SqliteStorage {
    async fn insert_new_setting(
        &self,
        project_id: &str,
        pipeline_id: &str,
        pipeline_name: &str,
        version: i32,
        is_template: bool,
    ) -> Result<u64, StorageError> {
        self.dao
            .insert_new_setting(
                &self.pool,
                project_id,
                pipeline_id,
                pipeline_name,
                version,
                is_template,
            )
            .await
    }

    async fn save_setting(
        &self,
        setting: &PipelineSetting,
        version: i32,
        is_template: bool,
    ) -> Result<u64, StorageError> {
        self.dao
            .save_setting(&self.pool, setting, version, is_template)
            .await
    }

    async fn get_setting(
        &self,
        pipeline_id: &str,
        version: i32,
    ) -> Result<Option<PipelineSettingVersionRecord>, StorageError> {
        self.dao.get_setting(&self.pool, pipeline_id, version).await
    }

    async fn get_settings(
        &self,
        pipeline_ids: &HashSet<String>,
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError> {
        self.dao.get_settings(&self.pool, pipeline_ids).await
    }

    async fn get_settings_in(
        &self,
        pipeline_ids: &[String],
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError> {
        self.dao.get_settings_in(&self.pool, pipeline_ids).await
    }

    async fn get_settings_by_name(
        &self,
        project_id: &str,
        name: &str,
        exclude_pipeline_id: Option<String>,
        is_template: bool,
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError> {
        self.dao
            .get_settings_by_name(
                &self.pool,
                project_id,
                name,
                exclude_pipeline_id.as_deref(),
                is_template,
            )
            .await
    }

    async fn update_setting_name(
        &self,
        pipeline_ids: &[String],
        name: &str,
    ) -> Result<(), StorageError> {
        self.dao
            .update_setting_name(&self.pool, pipeline_ids, name)
            .await
    }

    async fn update_setting(
        &self,
        pipeline_id: &str,
        name: &str,
        desc: &str,
    ) -> Result<(), StorageError> {
        self.dao
            .update_setting(&self.pool, pipeline_id, name, desc)
            .await
    }

    async fn update_setting_version(
        &self,
        pipeline_id: &str,
        version: i32,
        name: &str,
        desc: &str,
    ) -> Result<(), StorageError> {
        self.dao
            .update_setting_version(&self.pool, pipeline_id, version, name, desc)
            .await
    }

    async fn count_settings_by_name(
        &self,
        name: &str,
        project_id: &str,
        pipeline_id: &str,
        is_template: bool,
    ) -> Result<i64, StorageError> {
        self.dao
            .count_settings_by_name(&self.pool, name, project_id, pipeline_id, is_template)
            .await
    }

    async fn delete(&self, pipeline_id: &str) -> Result<u64, StorageError> {
        self.dao.delete(&self.pool, pipeline_id).await
    }
}

/// Blanket implementation for `Arc<SqliteStorage>` to allow sharing storage across threads.
#[async_trait]
impl PipelineSettingStore for Arc<SqliteStorage> {
    async fn insert_new_setting(
        &self,
        project_id: &str,
        pipeline_id: &str,
        pipeline_name: &str,
        version: i32,
        is_template: bool,
    ) -> Result<u64, StorageError> {
        self.as_ref()
            .insert_new_setting(project_id, pipeline_id, pipeline_name, version, is_template)
            .await
    }

    async fn save_setting(
        &self,
        setting: &PipelineSetting,
        version: i32,
        is_template: bool,
    ) -> Result<u64, StorageError> {
        self.as_ref()
            .save_setting(setting, version, is_template)
            .await
    }

    async fn get_setting(
        &self,
        pipeline_id: &str,
        version: i32,
    ) -> Result<Option<PipelineSettingVersionRecord>, StorageError> {
        self.as_ref().get_setting(pipeline_id, version).await
    }

    async fn get_settings(
        &self,
        pipeline_ids: &HashSet<String>,
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError> {
        self.as_ref().get_settings(pipeline_ids).await
    }

    async fn get_settings_in(
        &self,
        pipeline_ids: &[String],
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError> {
        self.as_ref().get_settings_in(pipeline_ids).await
    }

    async fn get_settings_by_name(
        &self,
        project_id: &str,
        name: &str,
        exclude_pipeline_id: Option<String>,
        is_template: bool,
    ) -> Result<Vec<PipelineSettingVersionRecord>, StorageError> {
        self.as_ref()
            .get_settings_by_name(project_id, name, exclude_pipeline_id, is_template)
            .await
    }

    async fn update_setting_name(
        &self,
        pipeline_ids: &[String],
        name: &str,
    ) -> Result<(), StorageError> {
        self.as_ref().update_setting_name(pipeline_ids, name).await
    }

    async fn update_setting(
        &self,
        pipeline_id: &str,
        name: &str,
        desc: &str,
    ) -> Result<(), StorageError> {
        self.as_ref().update_setting(pipeline_id, name, desc).await
    }

    async fn update_setting_version(
        &self,
        pipeline_id: &str,
        version: i32,
        name: &str,
        desc: &str,
    ) -> Result<(), StorageError> {
        self.as_ref()
            .update_setting_version(pipeline_id, version, name, desc)
            .await
    }

    async fn count_settings_by_name(
        &self,
        name: &str,
        project_id: &str,
        pipeline_id: &str,
        is_template: bool,
    ) -> Result<i64, StorageError> {
        self.as_ref()
            .count_settings_by_name(name, project_id, pipeline_id, is_template)
            .await
    }

    async fn delete(&self, pipeline_id: &str) -> Result<u64, StorageError> {
        self.as_ref().delete(pipeline_id).await
    }
}
