//! Emptiness check and header insertion.
//!
//! Both are infallible from the caller's point of view. A file that cannot be
//! read counts as non-empty, and a failed insert or save is logged and
//! reported as `false`.

use std::path::Path;

use crate::error::Result;
use crate::workspace::Workspace;

/// Whether `path` holds nothing but whitespace. Read failures count as non-empty.
pub async fn is_empty(workspace: &dyn Workspace, path: &Path) -> bool {
    match workspace.read_text(path).await {
        Ok(text) => text.trim().is_empty(),
        Err(e) => {
            tracing::debug!("treating {} as non-empty: {e}", path.display());
            false
        }
    }
}

/// Text actually inserted ahead of `existing` content.
///
/// Existing content is kept two newlines below the header.
pub fn insertion_text(header: &str, existing: &str) -> String {
    if existing.is_empty() {
        header.to_string()
    } else {
        format!("{header}\n\n")
    }
}

/// Insert `header` at the very start of `path` and save it.
///
/// Returns `true` once the file has been persisted. Errors are logged and
/// swallowed so one bad file never stops the rest of a batch.
pub async fn insert(workspace: &dyn Workspace, path: &Path, header: &str) -> bool {
    match try_insert(workspace, path, header).await {
        Ok(()) => {
            tracing::info!("inserted header into {}", path.display());
            true
        }
        Err(e) => {
            tracing::error!("failed to insert header into {}: {e}", path.display());
            false
        }
    }
}

async fn try_insert(workspace: &dyn Workspace, path: &Path, header: &str) -> Result<()> {
    let existing = workspace.read_text(path).await?;
    let text = insertion_text(header, &existing);

    let _staged = StagedEdit { workspace, path };
    workspace.apply_insert(path, 0, &text).await?;
    workspace.save(path).await
}

/// Discards whatever is still staged for `path` when dropped: after a failed
/// insert or save, or when the insertion task is aborted mid-write.
struct StagedEdit<'a> {
    workspace: &'a dyn Workspace,
    path: &'a Path,
}

impl Drop for StagedEdit<'_> {
    fn drop(&mut self) {
        self.workspace.discard(self.path);
    }
}
