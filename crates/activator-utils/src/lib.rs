//! # activator-utils
//!
//! Shared utilities for the activator-rs workspace: synchronization
//! primitives and index newtypes used across the type model and the
//! construction engine.
pub mod newtypes;
pub mod sync;

pub use newtypes::{ArgumentIndex, FieldIndex};

/// Returns `true` for the usual spellings of an enabled boolean flag
/// (`1`, `true`, `yes`, `on`), case-insensitively.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
