//! Run lock type and its stored integer codes.

use serde::{Deserialize, Serialize};

/// How concurrent builds of one pipeline are admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunLockType {
    /// Builds run concurrently.
    #[default]
    Multiple,
    /// One build at a time; later builds wait in the queue.
    Single,
    /// One build at a time; later builds are rejected.
    SingleLock,
    /// Builds sharing a concurrency group run one at a time.
    GroupLock,
    /// Pipeline is locked and accepts no builds.
    Lock,
}

impl RunLockType {
    /// Integer code persisted in the `run_lock_type` column.
    ///
    /// Codes are persisted and must never be renumbered; keep
    /// [`from_code`](Self::from_code) the exact inverse.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Multiple => 1,
            Self::Single => 2,
            Self::SingleLock => 3,
            Self::GroupLock => 4,
            Self::Lock => 5,
        }
    }

    /// Decode a stored code.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Multiple),
            2 => Some(Self::Single),
            3 => Some(Self::SingleLock),
            4 => Some(Self::GroupLock),
            5 => Some(Self::Lock),
            _ => None,
        }
    }
}
