//! Pipeline setting service.
//!
//! [`PipelineSettingService`] layers the duplicate-name guard over a
//! [`PipelineSettingStore`]. The store itself enforces nothing beyond the
//! primary key, so callers that rename or save a pipeline go through here.
//!
//! # Example
//!
//! ```ignore
//! use pipeline_setting_store::service::PipelineSettingService;
//!
//! let service = PipelineSettingService::new(storage);
//! service.rename("proj", "p-1", "Build2", "nightly", false).await?;
//! ```

use crate::error::AppError;
use crate::setting::PipelineSetting;
use crate::traits::PipelineSettingStore;

/// Name-checked operations over a pipeline setting store.
pub struct PipelineSettingService<S>
where
    S: PipelineSettingStore,
{
    store: S,
}

impl<S> PipelineSettingService<S>
where
    S: PipelineSettingStore,
{
    /// Create a new service over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Rename every version of a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NameConflict`] if another pipeline in the project
    /// already uses `name` within the same template scope, or
    /// [`AppError::Storage`] if a statement fails.
    pub async fn rename(
        &self,
        project_id: &str,
        pipeline_id: &str,
        name: &str,
        desc: &str,
        is_template: bool,
    ) -> Result<(), AppError> {
        self.ensure_name_free(project_id, pipeline_id, name, is_template)
            .await?;
        self.store.update_setting(pipeline_id, name, desc).await?;

        tracing::info!(project_id, pipeline_id, name, "Pipeline setting renamed");
        Ok(())
    }

    /// Save a new version of a pipeline's settings.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NameConflict`] if the setting's name is taken by
    /// another pipeline, or [`AppError::Storage`] if the version exists or a
    /// statement fails.
    pub async fn save_version(
        &self,
        setting: &PipelineSetting,
        version: i32,
        is_template: bool,
    ) -> Result<u64, AppError> {
        self.ensure_name_free(
            &setting.project_id,
            &setting.pipeline_id,
            &setting.pipeline_name,
            is_template,
        )
        .await?;

        let rows = self
            .store
            .save_setting(setting, version, is_template)
            .await?;
        Ok(rows)
    }

    /// Copy a template's new name onto every pipeline instantiated from it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the update fails.
    pub async fn propagate_template_name(
        &self,
        pipeline_ids: &[String],
        name: &str,
    ) -> Result<(), AppError> {
        self.store.update_setting_name(pipeline_ids, name).await?;

        tracing::info!(
            pipelines = pipeline_ids.len(),
            name,
            "Template name propagated"
        );
        Ok(())
    }

    async fn ensure_name_free(
        &self,
        project_id: &str,
        pipeline_id: &str,
        name: &str,
        is_template: bool,
    ) -> Result<(), AppError> {
        let count = self
            .store
            .count_settings_by_name(name, project_id, pipeline_id, is_template)
            .await?;

        if count > 0 {
            tracing::warn!(
                project_id,
                pipeline_id,
                name,
                count,
                "Pipeline name already in use"
            );
            return Err(AppError::NameConflict {
                project_id: project_id.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
