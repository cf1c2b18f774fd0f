//! Row type of the `pipeline_setting_version` table.
//!
//! [`PipelineSettingVersionRecord`] mirrors the stored columns one to one.
//! Conversion to and from [`PipelineSetting`] lives here so the insert and
//! read paths share a single encoding.

use serde::{Deserialize, Serialize};

use super::columns::{
    join_list, join_notify_types, minute_to_second, second_to_minute, split_list,
    split_notify_types,
};
use crate::config::{SettingDefaults, DEFAULT_NOTIFY_TYPES, START_USER_RECEIVER};
use crate::error::StorageError;
use crate::setting::{PipelineSetting, RunLockType, Subscription};

/// One stored version of a pipeline's settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettingVersionRecord {
    /// Owning project.
    pub project_id: String,
    /// Pipeline identifier.
    pub pipeline_id: String,
    /// Settings version.
    pub version: i32,
    /// Pipeline name.
    pub name: String,
    /// Pipeline description.
    pub desc: String,
    /// [`RunLockType`] code.
    pub run_lock_type: i32,
    /// Comma-joined success receivers.
    pub success_receiver: String,
    /// Comma-joined failure receivers.
    pub fail_receiver: String,
    /// Comma-joined success groups.
    pub success_group: String,
    /// Comma-joined failure groups.
    pub fail_group: String,
    /// Comma-joined success [`NotifyType`](crate::setting::NotifyType) names.
    pub success_type: String,
    /// Comma-joined failure [`NotifyType`](crate::setting::NotifyType) names.
    pub fail_type: String,
    /// Post successes to a WeChat group.
    pub success_wechat_group_flag: bool,
    /// Success WeChat group.
    pub success_wechat_group: String,
    /// Post failures to a WeChat group.
    pub fail_wechat_group_flag: bool,
    /// Failure WeChat group.
    pub fail_wechat_group: String,
    /// Attach detail on success.
    pub success_detail_flag: bool,
    /// Attach detail on failure.
    pub fail_detail_flag: bool,
    /// Success message template.
    pub success_content: String,
    /// Failure message template.
    pub fail_content: String,
    /// Queue wait in seconds.
    pub wait_queue_time_second: i32,
    /// Queue capacity.
    pub max_queue_size: i32,
    /// Whether the row belongs to a template.
    pub is_template: bool,
}

impl PipelineSettingVersionRecord {
    /// Build the row seeded for a newly created pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidData`] if the default wait time does
    /// not fit the seconds column.
    pub fn with_defaults(
        project_id: impl Into<String>,
        pipeline_id: impl Into<String>,
        pipeline_name: impl Into<String>,
        version: i32,
        is_template: bool,
        defaults: &SettingDefaults,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            project_id: project_id.into(),
            pipeline_id: pipeline_id.into(),
            version,
            name: pipeline_name.into(),
            desc: String::new(),
            run_lock_type: RunLockType::Multiple.code(),
            success_receiver: START_USER_RECEIVER.to_string(),
            fail_receiver: START_USER_RECEIVER.to_string(),
            success_group: String::new(),
            fail_group: String::new(),
            success_type: DEFAULT_NOTIFY_TYPES.to_string(),
            fail_type: DEFAULT_NOTIFY_TYPES.to_string(),
            success_wechat_group_flag: false,
            success_wechat_group: String::new(),
            fail_wechat_group_flag: false,
            fail_wechat_group: String::new(),
            success_detail_flag: false,
            fail_detail_flag: false,
            success_content: defaults.success_content.clone(),
            fail_content: defaults.fail_content.clone(),
            wait_queue_time_second: minute_to_second(defaults.wait_queue_time_minute)?,
            max_queue_size: defaults.max_queue_size,
            is_template,
        })
    }

    /// Encode a caller-supplied setting as a row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidData`] if the wait time does not fit
    /// the seconds column.
    pub fn from_setting(
        setting: &PipelineSetting,
        version: i32,
        is_template: bool,
    ) -> Result<Self, StorageError> {
        let success = &setting.success_subscription;
        let fail = &setting.fail_subscription;
        Ok(Self {
            project_id: setting.project_id.clone(),
            pipeline_id: setting.pipeline_id.clone(),
            version,
            name: setting.pipeline_name.clone(),
            desc: setting.desc.clone(),
            run_lock_type: setting.run_lock_type.code(),
            success_receiver: success.users.clone(),
            fail_receiver: fail.users.clone(),
            success_group: join_list(&success.groups),
            fail_group: join_list(&fail.groups),
            success_type: join_notify_types(&success.types),
            fail_type: join_notify_types(&fail.types),
            success_wechat_group_flag: success.wechat_group_flag,
            success_wechat_group: success.wechat_group.clone(),
            fail_wechat_group_flag: fail.wechat_group_flag,
            fail_wechat_group: fail.wechat_group.clone(),
            success_detail_flag: success.detail_flag,
            fail_detail_flag: fail.detail_flag,
            success_content: success.content.clone(),
            fail_content: fail.content.clone(),
            wait_queue_time_second: minute_to_second(setting.wait_queue_time_minute)?,
            max_queue_size: setting.max_queue_size,
            is_template,
        })
    }

    /// Decode the stored run lock code.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidData`] for an unknown code.
    pub fn run_lock(&self) -> Result<RunLockType, StorageError> {
        RunLockType::from_code(self.run_lock_type).ok_or_else(|| StorageError::InvalidData {
            message: format!(
                "unknown run lock code {} for pipeline {} version {}",
                self.run_lock_type, self.pipeline_id, self.version
            ),
        })
    }

    /// Decode the success subscription.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidData`] for an unknown notify type.
    pub fn success_subscription(&self) -> Result<Subscription, StorageError> {
        Ok(Subscription {
            types: split_notify_types(&self.success_type)?,
            groups: split_list(&self.success_group),
            users: self.success_receiver.clone(),
            wechat_group_flag: self.success_wechat_group_flag,
            wechat_group: self.success_wechat_group.clone(),
            detail_flag: self.success_detail_flag,
            content: self.success_content.clone(),
        })
    }

    /// Decode the failure subscription.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidData`] for an unknown notify type.
    pub fn fail_subscription(&self) -> Result<Subscription, StorageError> {
        Ok(Subscription {
            types: split_notify_types(&self.fail_type)?,
            groups: split_list(&self.fail_group),
            users: self.fail_receiver.clone(),
            wechat_group_flag: self.fail_wechat_group_flag,
            wechat_group: self.fail_wechat_group.clone(),
            detail_flag: self.fail_detail_flag,
            content: self.fail_content.clone(),
        })
    }

    /// Convert the row back into a [`PipelineSetting`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidData`] if a stored code or type name
    /// is unknown.
    pub fn to_setting(&self) -> Result<PipelineSetting, StorageError> {
        Ok(PipelineSetting {
            project_id: self.project_id.clone(),
            pipeline_id: self.pipeline_id.clone(),
            pipeline_name: self.name.clone(),
            desc: self.desc.clone(),
            run_lock_type: self.run_lock()?,
            success_subscription: self.success_subscription()?,
            fail_subscription: self.fail_subscription()?,
            wait_queue_time_minute: second_to_minute(self.wait_queue_time_second),
            max_queue_size: self.max_queue_size,
        })
    }
}
