//! Filesystem source of creation batches.
//!
//! Only files pass; directories and anything the workspace [`PathFilter`]
//! ignores (hidden, vendored, build output, gitignored) are dropped before a
//! batch is sent.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::Result;
use crate::filter::PathFilter;

/// Paths reported together by one creation notification.
pub type CreatedBatch = Vec<PathBuf>;

const CHANNEL_CAPACITY: usize = 100;

/// Watch a directory tree for newly created files.
pub struct CreationWatcher {
    _watcher: notify::RecommendedWatcher,
    receiver: mpsc::Receiver<CreatedBatch>,
}

impl CreationWatcher {
    pub fn new(root: &Path) -> Result<Self> {
        let root = root.canonicalize()?;
        let filter = PathFilter::new(&root);
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Some(batch) = Self::classify_event(&event, &filter) {
                    let _ = tx.blocking_send(batch);
                }
            }
            Err(e) => tracing::warn!("watch error: {e}"),
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;
        tracing::info!("watching {}", root.display());

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Turn a creation event into a batch of file paths.
    fn classify_event(event: &Event, filter: &PathFilter) -> Option<CreatedBatch> {
        if !matches!(event.kind, EventKind::Create(_)) {
            return None;
        }
        let files: CreatedBatch = event
            .paths
            .iter()
            .filter(|p| !p.is_dir())
            .filter(|p| {
                let ignored = filter.is_ignored(p);
                if ignored {
                    tracing::trace!("ignoring {}", p.display());
                }
                !ignored
            })
            .cloned()
            .collect();
        if files.is_empty() {
            None
        } else {
            Some(files)
        }
    }

    /// Next batch, or `None` once the watcher has shut down.
    pub async fn next_batch(&mut self) -> Option<CreatedBatch> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};
    use tokio::time::{timeout, Duration};

    fn filter() -> PathFilter {
        PathFilter::new(Path::new("/nonexistent"))
    }

    #[test]
    fn test_classify_create_file() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/nonexistent/a.py"));
        assert_eq!(
            CreationWatcher::classify_event(&event, &filter()),
            Some(vec![PathBuf::from("/nonexistent/a.py")])
        );
    }

    #[test]
    fn test_classify_ignores_modify() {
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/nonexistent/a.py"));
        assert!(CreationWatcher::classify_event(&event, &filter()).is_none());
    }

    #[test]
    fn test_classify_drops_directories() {
        let dir = tempfile::tempdir().unwrap();
        let event = Event::new(EventKind::Create(CreateKind::Any)).add_path(dir.path().to_path_buf());
        assert!(CreationWatcher::classify_event(&event, &filter()).is_none());
    }

    #[test]
    fn test_classify_drops_ignored_paths() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/nonexistent/node_modules/pkg/index.js"))
            .add_path(PathBuf::from("/nonexistent/.git/hooks/post-merge.py"))
            .add_path(PathBuf::from("/nonexistent/src/app.js"));
        assert_eq!(
            CreationWatcher::classify_event(&event, &filter()),
            Some(vec![PathBuf::from("/nonexistent/src/app.js")])
        );
    }

    #[test]
    fn test_classify_all_ignored_is_none() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/nonexistent/target/debug/gen.rs"));
        assert!(CreationWatcher::classify_event(&event, &filter()).is_none());
    }

    #[tokio::test]
    async fn test_watcher_skips_vendored_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        let mut watcher = CreationWatcher::new(dir.path()).unwrap();

        std::fs::write(dir.path().join("node_modules/pkg/index.js"), "").unwrap();
        std::fs::write(dir.path().join("app.js"), "").unwrap();

        let batch = timeout(Duration::from_secs(5), watcher.next_batch())
            .await
            .expect("no creation event within 5s")
            .unwrap();
        assert!(batch.iter().all(|p| !p.to_string_lossy().contains("node_modules")));
        assert!(batch.iter().any(|p| p.ends_with("app.js")));
    }

    #[tokio::test]
    async fn test_watcher_reports_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = CreationWatcher::new(dir.path()).unwrap();

        let path = dir.path().join("fresh.rs");
        std::fs::write(&path, "").unwrap();

        let batch = timeout(Duration::from_secs(5), watcher.next_batch())
            .await
            .expect("no creation event within 5s")
            .unwrap();
        assert!(batch.iter().any(|p| p.ends_with("fresh.rs")));
    }
}
