//! Column encodings for multi-valued and duration fields.

use crate::error::StorageError;
use crate::setting::NotifyType;

const SEPARATOR: &str = ",";

/// Join values into one comma-separated column value.
pub(crate) fn join_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Split a comma-separated column value. An empty column is an empty list.
pub(crate) fn split_list(column: &str) -> Vec<String> {
    if column.is_empty() {
        return Vec::new();
    }
    column.split(SEPARATOR).map(str::to_string).collect()
}

/// Join notification types by their stored names.
pub(crate) fn join_notify_types(types: &[NotifyType]) -> String {
    types
        .iter()
        .map(NotifyType::as_str)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Parse stored notification type names, skipping empty segments.
pub(crate) fn split_notify_types(column: &str) -> Result<Vec<NotifyType>, StorageError> {
    column
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            NotifyType::from_str(name).ok_or_else(|| StorageError::InvalidData {
                message: format!("unknown notify type '{name}'"),
            })
        })
        .collect()
}

/// Convert a queue wait to the stored seconds.
///
/// Fails with [`StorageError::InvalidData`] when the seconds do not fit the
/// column.
pub(crate) fn minute_to_second(minutes: i32) -> Result<i32, StorageError> {
    minutes
        .checked_mul(60)
        .ok_or_else(|| StorageError::InvalidData {
            message: format!("wait queue time of {minutes} minutes is out of range"),
        })
}

pub(crate) const fn second_to_minute(seconds: i32) -> i32 {
    seconds / 60
}
