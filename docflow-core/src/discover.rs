//! Workflow discovery over a directory.
//!
//! Enumerates one directory (non-recursive) and constructs a model for every
//! JSON document that loads `Valid`. Non-JSON files and non-valid documents
//! are skipped, never surfaced as errors; the only error is an unreadable
//! directory. Entries keep the directory-listing order.

use crate::error::CoreError;
use crate::loader::LoadStatus;
use crate::model::Workflow;
use std::path::Path;

/// A workflow found by discovery, keyed by its file name.
#[derive(Debug)]
pub struct DiscoveredWorkflow {
    /// File name within the scanned directory, extension included.
    pub name: String,
    /// The loaded, `Valid` model.
    pub workflow: Workflow,
}

/// Suspending discovery. Models are constructed sequentially; they share no
/// state, so callers that want parallelism can fan out themselves.
pub async fn discover(dir: impl AsRef<Path>) -> Result<Vec<DiscoveredWorkflow>, CoreError> {
    let mut found = Vec::new();
    let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() || !has_json_extension(&path) {
            continue;
        }
        let workflow = Workflow::load(&path).await;
        keep_if_valid(&mut found, &path, workflow);
    }

    Ok(found)
}

/// Blocking variant of [`discover`].
pub fn discover_sync(dir: impl AsRef<Path>) -> Result<Vec<DiscoveredWorkflow>, CoreError> {
    let mut found = Vec::new();

    for entry in std::fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() || !has_json_extension(&path) {
            continue;
        }
        let workflow = Workflow::load_sync(&path);
        keep_if_valid(&mut found, &path, workflow);
    }

    Ok(found)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

fn keep_if_valid(found: &mut Vec<DiscoveredWorkflow>, path: &Path, workflow: Workflow) {
    let name = match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.to_string(),
        None => return,
    };

    match workflow.status() {
        LoadStatus::Valid => found.push(DiscoveredWorkflow { name, workflow }),
        status => {
            tracing::debug!("skipping '{}': document status {}", path.display(), status);
        }
    }
}
