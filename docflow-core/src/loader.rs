//! Document loading and shape classification.
//!
//! Loading is a single-shot operation: bytes are read, parsed as JSON, and
//! shape-checked, producing a [`Workflow`] whose status never changes again.
//! IO and parse failures are collapsed into a non-`Valid` status with one log
//! entry; no error crosses the load boundary for these recoverable cases.
//! Callers branch on [`Workflow::status`] before trusting query results.
//!
//! The suspending and blocking variants both delegate to
//! [`Workflow::from_bytes`], so the same bytes always produce identical
//! in-memory models.

use crate::document::DocumentRoot;
use crate::model::{Loaded, Workflow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Lifecycle status of a workflow model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// Never loaded: the source was unreadable or not well-formed JSON.
    Empty,
    /// Loaded but failed shape validation.
    Invalid,
    /// Loaded and shape-checked.
    Valid,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadStatus::Empty => "empty",
            LoadStatus::Invalid => "invalid",
            LoadStatus::Valid => "valid",
        };
        f.write_str(s)
    }
}

impl Workflow {
    /// Parses and classifies a raw byte buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to parse workflow document: {}", e);
                return Self::empty();
            }
        };

        let checksum = Some(format!("{:08x}", crc32c::crc32c(bytes)));

        if let Err(reason) = validate_shape(&value) {
            tracing::debug!("workflow document failed shape validation: {}", reason);
            return Self {
                loaded: Loaded::Invalid(value),
                checksum,
            };
        }

        match serde_json::from_value::<DocumentRoot>(value.clone()) {
            Ok(root) => Self {
                loaded: Loaded::Valid(root.workflow),
                checksum,
            },
            Err(e) => {
                tracing::debug!("workflow document failed field validation: {}", e);
                Self {
                    loaded: Loaded::Invalid(value),
                    checksum,
                }
            }
        }
    }

    /// Loads a workflow document from a file, suspending while the bytes
    /// arrive. This is the only suspension point in the engine.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match tokio::fs::read(path).await {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) => {
                tracing::error!("failed to read workflow document '{}': {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Blocking variant of [`Workflow::load`].
    pub fn load_sync(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) => {
                tracing::error!("failed to read workflow document '{}': {}", path.display(), e);
                Self::empty()
            }
        }
    }
}

/// Gross shape checks: a `workflow` root carrying `doctype`, `states`,
/// `permissions`, `transitions`, with each nested collection an actual
/// sequence. A single object where a sequence is expected is the classic
/// artifact of converted single-child XML elements and is classified invalid.
fn validate_shape(value: &Value) -> Result<(), String> {
    let root = value
        .get("workflow")
        .ok_or_else(|| "missing root key 'workflow'".to_string())?;

    if !root.is_object() {
        return Err("'workflow' is not an object".to_string());
    }

    for key in ["doctype", "states", "permissions", "transitions"] {
        if root.get(key).is_none() {
            return Err(format!("missing '{}'", key));
        }
    }

    for (outer, inner) in [
        ("states", "state"),
        ("permissions", "permission"),
        ("transitions", "transition"),
    ] {
        match root.get(outer).and_then(|wrapper| wrapper.get(inner)) {
            Some(Value::Array(_)) => {}
            Some(_) => return Err(format!("'{}.{}' is not a sequence", outer, inner)),
            None => return Err(format!("missing '{}.{}'", outer, inner)),
        }
    }

    Ok(())
}
