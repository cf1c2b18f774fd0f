//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - The seed values written by
//!   [`insert_new_setting`](crate::storage::PipelineSettingVersionDao::insert_new_setting)
//!
//! # Example
//!
//! ```
//! use pipeline_setting_store::config::{Config, SettingDefaults, DEFAULT_DATABASE_PATH};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     database_path: DEFAULT_DATABASE_PATH.to_string(),
//!     defaults: SettingDefaults::default(),
//! };
//!
//! assert_eq!(config.defaults.wait_queue_time_minute, 1);
//! assert_eq!(config.defaults.max_queue_size, 10);
//! ```

mod validation;

pub use validation::{
    validate_config, MAX_QUEUE_SIZE, MAX_WAIT_QUEUE_TIME_MINUTE, MIN_WAIT_QUEUE_TIME_MINUTE,
};

use crate::error::ConfigError;

/// Default database path.
pub const DEFAULT_DATABASE_PATH: &str = "./data/pipeline_settings.db";

/// Default queue wait for new pipelines, in minutes.
pub const DEFAULT_WAIT_QUEUE_TIME_MINUTE: i32 = 1;

/// Default queue capacity for new pipelines.
pub const DEFAULT_MAX_QUEUE_SIZE: i32 = 10;

/// Build variable holding the user who started the pipeline.
pub const PIPELINE_START_USER_NAME: &str = "BK_CI_START_USER_NAME";

/// Receiver placeholder resolved to the user who started the pipeline.
pub const START_USER_RECEIVER: &str = "${BK_CI_START_USER_NAME}";

/// Channels enabled on new pipelines, in stored form.
pub const DEFAULT_NOTIFY_TYPES: &str = "EMAIL,RTX";

/// Default success message template.
pub const DEFAULT_SUCCESS_CONTENT: &str = "[${{ci.project_name}}] - [${{ci.pipeline_name}}] \
#${{ci.build_num}} succeeded in ${{ci.build_total_time}}, started by ${{ci.build_start_user}}.";

/// Default failure message template.
pub const DEFAULT_FAIL_CONTENT: &str = "[${{ci.project_name}}] - [${{ci.pipeline_name}}] \
#${{ci.build_num}} failed after ${{ci.build_total_time}}, started by ${{ci.build_start_user}}.";

/// Values seeded into a pipeline's first setting row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDefaults {
    /// Queue wait in minutes; stored as seconds.
    pub wait_queue_time_minute: i32,
    /// Queue capacity.
    pub max_queue_size: i32,
    /// Success message template.
    pub success_content: String,
    /// Failure message template.
    pub fail_content: String,
}

impl Default for SettingDefaults {
    fn default() -> Self {
        Self {
            wait_queue_time_minute: DEFAULT_WAIT_QUEUE_TIME_MINUTE,
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
            success_content: DEFAULT_SUCCESS_CONTENT.to_string(),
            fail_content: DEFAULT_FAIL_CONTENT.to_string(),
        }
    }
}

/// Store configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Database path.
    pub database_path: String,
    /// Seed values for new pipelines.
    pub defaults: SettingDefaults,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `DATABASE_PATH`: Path to `SQLite` database (default: `./data/pipeline_settings.db`)
    /// - `PIPELINE_SETTING_WAIT_QUEUE_TIME_MINUTE_DEFAULT` (default: `1`)
    /// - `PIPELINE_SETTING_MAX_QUEUE_SIZE_DEFAULT` (default: `10`)
    /// - `PIPELINE_SETTING_SUCCESS_CONTENT`: success template
    /// - `PIPELINE_SETTING_FAIL_CONTENT`: failure template
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse or any
    /// value fails validation (see [`validate_config`]).
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());

        let wait_queue_time_minute = parse_env_i32(
            "PIPELINE_SETTING_WAIT_QUEUE_TIME_MINUTE_DEFAULT",
            DEFAULT_WAIT_QUEUE_TIME_MINUTE,
        )?;
        let max_queue_size = parse_env_i32(
            "PIPELINE_SETTING_MAX_QUEUE_SIZE_DEFAULT",
            DEFAULT_MAX_QUEUE_SIZE,
        )?;

        let success_content = std::env::var("PIPELINE_SETTING_SUCCESS_CONTENT")
            .unwrap_or_else(|_| DEFAULT_SUCCESS_CONTENT.into());
        let fail_content = std::env::var("PIPELINE_SETTING_FAIL_CONTENT")
            .unwrap_or_else(|_| DEFAULT_FAIL_CONTENT.into());

        let config = Self {
            database_path,
            defaults: SettingDefaults {
                wait_queue_time_minute,
                max_queue_size,
                success_content,
                fail_content,
            },
        };

        validate_config(&config)?;
        Ok(config)
    }
}

/// Parse an environment variable as i32, using a default if not set.
fn parse_env_i32(name: &str, default: i32) -> Result<i32, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be an integer".into(),
        })
    })
}
