//! Utility functions and helpers
//!
//! Timestamps, authorship and crash-safe file writes.

pub mod atomic;
pub mod time;

pub use atomic::atomic_write;
pub use time::{current_timestamp, get_current_user};
