//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Mock store factories
//! - Setting fixtures
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::setting::{NotifyType, PipelineSetting, RunLockType, Subscription};
use crate::traits::MockPipelineSettingStore;

/// A fully populated setting for pipeline `p-1` in project `proj`.
#[must_use]
pub fn sample_setting() -> PipelineSetting {
    PipelineSetting::new("proj", "p-1", "Build")
        .with_desc("nightly build")
        .with_run_lock_type(RunLockType::Single)
        .with_subscriptions(
            Subscription::new("alice,bob")
                .with_types(vec![NotifyType::Email, NotifyType::Wework])
                .with_groups(["dev"])
                .with_content("ok"),
            Subscription::new("carol")
                .with_types(vec![NotifyType::Sms])
                .with_wechat_group("wg-1")
                .with_detail(true)
                .with_content("failed"),
        )
        .with_queue(5, 20)
}

/// Create a mock store whose name count always returns `count`.
#[must_use]
pub fn mock_store_with_name_count(count: i64) -> MockPipelineSettingStore {
    let mut mock = MockPipelineSettingStore::new();
    mock.expect_count_settings_by_name()
        .returning(move |_, _, _, _| Ok(count));
    mock
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PipelineSettingStore;

    #[test]
    fn test_sample_setting_fields() {
        let setting = sample_setting();
        assert_eq!(setting.pipeline_id, "p-1");
        assert_eq!(setting.run_lock_type, RunLockType::Single);
        assert!(setting.fail_subscription.wechat_group_flag);
    }

    #[tokio::test]
    async fn test_mock_store_with_name_count() {
        let mock = mock_store_with_name_count(4);
        let count = mock
            .count_settings_by_name("Build", "proj", "p-1", false)
            .await
            .unwrap();
        assert_eq!(count, 4);
    }
}
