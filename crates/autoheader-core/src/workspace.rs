//! Document access: read text, stage an insertion, persist.
//!
//! [`Workspace`] is the seam between header logic and whatever owns the
//! files. Edits are staged first and only reach storage on [`Workspace::save`],
//! the way an editor buffer does. A staged edit that will never be saved must
//! be dropped with [`Workspace::discard`], or later reads keep seeing it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AutoHeaderError, Result};

/// File operations needed by the header writer.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Current text of `path`, including staged but unsaved edits.
    async fn read_text(&self, path: &Path) -> Result<String>;

    /// Stage `text` at character `offset` of `path`.
    async fn apply_insert(&self, path: &Path, offset: usize, text: &str) -> Result<()>;

    /// Persist staged edits for `path`.
    async fn save(&self, path: &Path) -> Result<()>;

    /// Drop staged edits for `path` without saving. No-op when nothing is staged.
    fn discard(&self, path: &Path);
}

/// Insert `text` at a character offset into `buf`.
fn insert_at_char(path: &Path, buf: &mut String, offset: usize, text: &str) -> Result<()> {
    let byte = if offset == 0 {
        0
    } else {
        let len = buf.chars().count();
        if offset > len {
            return Err(AutoHeaderError::OffsetOutOfBounds {
                path: path.to_path_buf(),
                offset,
                len,
            });
        }
        buf.char_indices()
            .nth(offset)
            .map(|(i, _)| i)
            .unwrap_or(buf.len())
    };
    buf.insert_str(byte, text);
    Ok(())
}

/// Workspace backed by the local filesystem.
///
/// The staging lock is never held across file I/O.
#[derive(Debug, Default)]
pub struct FsWorkspace {
    staged: Mutex<HashMap<PathBuf, String>>,
}

impl FsWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths with edits not yet saved.
    pub fn dirty(&self) -> Vec<PathBuf> {
        lock(&self.staged).keys().cloned().collect()
    }

    fn staged_text(&self, path: &Path) -> Option<String> {
        lock(&self.staged).get(path).cloned()
    }
}

#[async_trait]
impl Workspace for FsWorkspace {
    async fn read_text(&self, path: &Path) -> Result<String> {
        match self.staged_text(path) {
            Some(buf) => Ok(buf),
            None => Ok(tokio::fs::read_to_string(path).await?),
        }
    }

    async fn apply_insert(&self, path: &Path, offset: usize, text: &str) -> Result<()> {
        let mut buf = match self.staged_text(path) {
            Some(buf) => buf,
            None => tokio::fs::read_to_string(path).await?,
        };
        insert_at_char(path, &mut buf, offset, text)?;
        lock(&self.staged).insert(path.to_path_buf(), buf);
        Ok(())
    }

    async fn save(&self, path: &Path) -> Result<()> {
        let text = self
            .staged_text(path)
            .ok_or_else(|| AutoHeaderError::NotOpen(path.to_path_buf()))?;

        let mut file = tokio::fs::File::create(path).await?;
        file.write_all(text.as_bytes()).await?;
        file.sync_all().await?;

        self.discard(path);
        tracing::debug!("saved {}", path.display());
        Ok(())
    }

    fn discard(&self, path: &Path) {
        if lock(&self.staged).remove(path).is_some() {
            tracing::debug!("dropped staged edit for {}", path.display());
        }
    }
}

/// In-memory workspace for tests.
///
/// Holds "disk" contents separately from staged edits. Reads of unknown paths
/// fail like a missing file would.
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    disk: Mutex<HashMap<PathBuf, String>>,
    staged: Mutex<HashMap<PathBuf, String>>,
    fail_saves: Mutex<bool>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.set_content(path, content);
        self
    }

    /// Overwrite the on-disk content, as another writer would.
    pub fn set_content(&self, path: impl Into<PathBuf>, content: &str) {
        lock(&self.disk).insert(path.into(), content.to_string());
    }

    pub fn remove(&self, path: &Path) {
        lock(&self.disk).remove(path);
    }

    /// Saved content of `path`.
    pub fn content(&self, path: &Path) -> Option<String> {
        lock(&self.disk).get(path).cloned()
    }

    /// Paths with edits not yet saved.
    pub fn dirty(&self) -> Vec<PathBuf> {
        lock(&self.staged).keys().cloned().collect()
    }

    /// Make every subsequent `save` fail.
    pub fn fail_saves(&self, fail: bool) {
        *lock(&self.fail_saves) = fail;
    }

    fn not_found(path: &Path) -> AutoHeaderError {
        AutoHeaderError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        ))
    }
}

#[async_trait]
impl Workspace for MemoryWorkspace {
    async fn read_text(&self, path: &Path) -> Result<String> {
        if let Some(buf) = lock(&self.staged).get(path) {
            return Ok(buf.clone());
        }
        lock(&self.disk)
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }

    async fn apply_insert(&self, path: &Path, offset: usize, text: &str) -> Result<()> {
        let mut staged = lock(&self.staged);
        if !staged.contains_key(path) {
            let on_disk = lock(&self.disk)
                .get(path)
                .cloned()
                .ok_or_else(|| Self::not_found(path))?;
            staged.insert(path.to_path_buf(), on_disk);
        }
        let buf = staged
            .get_mut(path)
            .ok_or_else(|| AutoHeaderError::NotOpen(path.to_path_buf()))?;
        insert_at_char(path, buf, offset, text)
    }

    async fn save(&self, path: &Path) -> Result<()> {
        if *lock(&self.fail_saves) {
            return Err(AutoHeaderError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "save rejected",
            )));
        }
        let text = lock(&self.staged)
            .remove(path)
            .ok_or_else(|| AutoHeaderError::NotOpen(path.to_path_buf()))?;
        lock(&self.disk).insert(path.to_path_buf(), text);
        Ok(())
    }

    fn discard(&self, path: &Path) {
        lock(&self.staged).remove(path);
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
