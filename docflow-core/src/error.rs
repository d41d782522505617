//! Core error types.
//!
//! The loader never returns these: unreadable or malformed sources collapse
//! into a non-`Valid` status instead. Errors surface only where the caller
//! can act on them — action hooks and directory discovery.

use thiserror::Error;

/// Errors from the workflow engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("action '{action}' failed: {reason}")]
    ActionFailed { action: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Convenience constructor for hook implementations.
    pub fn action_failed(action: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::ActionFailed {
            action: action.into(),
            reason: reason.into(),
        }
    }
}
