//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::Config;
use crate::error::ConfigError;

/// Minimum queue wait in minutes.
pub const MIN_WAIT_QUEUE_TIME_MINUTE: i32 = 1;

/// Maximum queue wait in minutes (one day).
pub const MAX_WAIT_QUEUE_TIME_MINUTE: i32 = 1440;

/// Maximum queue capacity.
pub const MAX_QUEUE_SIZE: i32 = 200;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `DATABASE_PATH` must not be empty
/// - `PIPELINE_SETTING_WAIT_QUEUE_TIME_MINUTE_DEFAULT` must be between 1 and 1440
/// - `PIPELINE_SETTING_MAX_QUEUE_SIZE_DEFAULT` must be between 0 and 200
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.database_path.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "DATABASE_PATH".into(),
            reason: "must not be empty".into(),
        });
    }

    let wait = config.defaults.wait_queue_time_minute;
    if !(MIN_WAIT_QUEUE_TIME_MINUTE..=MAX_WAIT_QUEUE_TIME_MINUTE).contains(&wait) {
        return Err(ConfigError::InvalidValue {
            var: "PIPELINE_SETTING_WAIT_QUEUE_TIME_MINUTE_DEFAULT".into(),
            reason: format!(
                "must be between {MIN_WAIT_QUEUE_TIME_MINUTE} and {MAX_WAIT_QUEUE_TIME_MINUTE}"
            ),
        });
    }

    if !(0..=MAX_QUEUE_SIZE).contains(&config.defaults.max_queue_size) {
        return Err(ConfigError::InvalidValue {
            var: "PIPELINE_SETTING_MAX_QUEUE_SIZE_DEFAULT".into(),
            reason: format!("must be between 0 and {MAX_QUEUE_SIZE}"),
        });
    }

    Ok(())
}
