//! Notification channel types and their stored names.

#![allow(clippy::should_implement_trait)]

use serde::{Deserialize, Serialize};

/// A channel a build notification is delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotifyType {
    /// Email.
    Email,
    /// RTX instant message.
    Rtx,
    /// WeChat message.
    Wechat,
    /// SMS.
    Sms,
    /// WeWork message.
    Wework,
    /// Voice call.
    Voice,
    /// WeWork group robot.
    WeworkGroup,
}

impl NotifyType {
    /// Name persisted in the `*_type` columns.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Rtx => "RTX",
            Self::Wechat => "WECHAT",
            Self::Sms => "SMS",
            Self::Wework => "WEWORK",
            Self::Voice => "VOICE",
            Self::WeworkGroup => "WEWORK_GROUP",
        }
    }

    /// Parse a stored name.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "EMAIL" => Some(Self::Email),
            "RTX" => Some(Self::Rtx),
            "WECHAT" => Some(Self::Wechat),
            "SMS" => Some(Self::Sms),
            "WEWORK" => Some(Self::Wework),
            "VOICE" => Some(Self::Voice),
            "WEWORK_GROUP" => Some(Self::WeworkGroup),
            _ => None,
        }
    }
}
