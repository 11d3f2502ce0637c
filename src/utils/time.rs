//! Timestamp and authorship helpers

use std::env;

/// Current Unix timestamp in seconds
pub fn current_timestamp() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// Author recorded on relations created without an explicit `createdBy`
///
/// Checks `LEXIKON_USER`, then the OS user variables.
pub fn get_current_user() -> String {
    ["LEXIKON_USER", "USER", "USERNAME"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| "anonymous".to_string())
}
