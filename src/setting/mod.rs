//! Pipeline setting domain types.
//!
//! This module defines the caller-facing shape of a pipeline's settings:
//! - [`PipelineSetting`]: The full settings snapshot saved per version
//! - [`Subscription`]: Success or failure notification preferences
//! - [`RunLockType`]: Build admission policy, stored as an integer code
//! - [`NotifyType`]: Notification channel, stored by name
//!
//! Stored encodings go through explicit tables on the enums rather than
//! serde names, so renaming a variant cannot change what is persisted.

mod notify_type;
mod run_lock;

pub use notify_type::NotifyType;
pub use run_lock::RunLockType;

use serde::{Deserialize, Serialize};

/// Notification preferences for one build outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Channels to notify through.
    pub types: Vec<NotifyType>,
    /// User groups to notify.
    pub groups: Vec<String>,
    /// Comma-joined user names.
    pub users: String,
    /// Whether to post to a WeChat group.
    pub wechat_group_flag: bool,
    /// WeChat group identifiers.
    pub wechat_group: String,
    /// Whether to attach build detail.
    pub detail_flag: bool,
    /// Message template.
    pub content: String,
}

impl Subscription {
    /// Create a subscription for the given users with no channels.
    #[must_use]
    pub fn new(users: impl Into<String>) -> Self {
        Self {
            users: users.into(),
            ..Self::default()
        }
    }

    /// Set notification channels.
    #[must_use]
    pub fn with_types(mut self, types: Vec<NotifyType>) -> Self {
        self.types = types;
        self
    }

    /// Set user groups.
    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Enable WeChat group delivery.
    #[must_use]
    pub fn with_wechat_group(mut self, wechat_group: impl Into<String>) -> Self {
        self.wechat_group_flag = true;
        self.wechat_group = wechat_group.into();
        self
    }

    /// Set the detail flag.
    #[must_use]
    pub const fn with_detail(mut self, detail_flag: bool) -> Self {
        self.detail_flag = detail_flag;
        self
    }

    /// Set the message template.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// Settings snapshot of a pipeline, as supplied by the upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSetting {
    /// Owning project.
    pub project_id: String,
    /// Pipeline identifier.
    pub pipeline_id: String,
    /// Display name.
    pub pipeline_name: String,
    /// Description.
    pub desc: String,
    /// Build admission policy.
    pub run_lock_type: RunLockType,
    /// Notification on success.
    pub success_subscription: Subscription,
    /// Notification on failure.
    pub fail_subscription: Subscription,
    /// How long a queued build waits, in minutes.
    pub wait_queue_time_minute: i32,
    /// Queue capacity.
    pub max_queue_size: i32,
}

impl PipelineSetting {
    /// Create a setting with empty subscriptions and zero queue limits.
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        pipeline_id: impl Into<String>,
        pipeline_name: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            pipeline_id: pipeline_id.into(),
            pipeline_name: pipeline_name.into(),
            desc: String::new(),
            run_lock_type: RunLockType::default(),
            success_subscription: Subscription::default(),
            fail_subscription: Subscription::default(),
            wait_queue_time_minute: 0,
            max_queue_size: 0,
        }
    }

    /// Set description.
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Set run lock type.
    #[must_use]
    pub const fn with_run_lock_type(mut self, run_lock_type: RunLockType) -> Self {
        self.run_lock_type = run_lock_type;
        self
    }

    /// Set both subscriptions.
    #[must_use]
    pub fn with_subscriptions(mut self, success: Subscription, fail: Subscription) -> Self {
        self.success_subscription = success;
        self.fail_subscription = fail;
        self
    }

    /// Set queue limits.
    #[must_use]
    pub const fn with_queue(mut self, wait_queue_time_minute: i32, max_queue_size: i32) -> Self {
        self.wait_queue_time_minute = wait_queue_time_minute;
        self.max_queue_size = max_queue_size;
        self
    }
}
