//! Core error model.

use thiserror::Error;

/// Core-level error.
///
/// Keep this focused on deterministic failures such as malformed ids.
/// Session and transport concerns belong to their own crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl CoreError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
