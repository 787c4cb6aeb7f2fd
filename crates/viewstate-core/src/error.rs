#![forbid(unsafe_code)]

//! Error type shared by every viewstate crate.

use std::fmt;

/// Errors raised by classification and session setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewstateError {
    /// A caller passed a value outside the accepted domain: a negative or
    /// non-finite dimension, or a selector the host cannot evaluate.
    InvalidInput(String),
    /// No renderable document root exists, so there is nothing to reconcile.
    SurfaceUnavailable,
}

impl ViewstateError {
    /// Shorthand for [`ViewstateError::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl fmt::Display for ViewstateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::SurfaceUnavailable => f.write_str("rendering surface unavailable"),
        }
    }
}

impl std::error::Error for ViewstateError {}

/// Result alias used across the core crate.
pub type Result<T> = std::result::Result<T, ViewstateError>;
