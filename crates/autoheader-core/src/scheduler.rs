//! Delayed, cancellable header insertions keyed by path.
//!
//! Each pending insertion runs as its own task: wait out the debounce delay,
//! re-check that the file is still empty, then write. Scheduling a path that
//! already has a pending task replaces it. Dropping the scheduler aborts
//! whatever has not fired yet.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::handler::PendingInsertion;
use crate::workspace::Workspace;
use crate::writer;

/// Default wait before the emptiness re-check.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// How a pending insertion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Header written and saved.
    Inserted,
    /// The file had content (or could not be read) when the delay elapsed.
    SkippedNotEmpty,
    /// Insert or save failed; already logged.
    Failed,
    /// Aborted before completion.
    Cancelled,
}

pub struct InsertScheduler {
    workspace: Arc<dyn Workspace>,
    delay: Duration,
    pending: HashMap<PathBuf, JoinHandle<InsertOutcome>>,
}

impl InsertScheduler {
    pub fn new(workspace: Arc<dyn Workspace>, delay: Duration) -> Self {
        Self {
            workspace,
            delay,
            pending: HashMap::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `insertion` after the debounce delay. Must be called within a
    /// tokio runtime.
    pub fn schedule(&mut self, insertion: PendingInsertion) {
        self.pending.retain(|_, handle| !handle.is_finished());

        let path = insertion.path.clone();
        let task = tokio::spawn(run_pending(
            Arc::clone(&self.workspace),
            self.delay,
            insertion,
        ));
        if let Some(previous) = self.pending.insert(path.clone(), task) {
            tracing::debug!("replacing pending insertion for {}", path.display());
            previous.abort();
        }
    }

    /// Number of insertions that have not finished yet.
    pub fn pending(&self) -> usize {
        self.pending.values().filter(|h| !h.is_finished()).count()
    }

    /// Abort the pending insertion for `path`, if any.
    pub fn cancel(&mut self, path: &Path) -> bool {
        match self.pending.remove(path) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }

    /// Wait for every scheduled insertion and collect the outcomes.
    pub async fn drain(&mut self) -> Vec<(PathBuf, InsertOutcome)> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        for (path, handle) in self.pending.drain() {
            let outcome = handle.await.unwrap_or(InsertOutcome::Cancelled);
            outcomes.push((path, outcome));
        }
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));
        outcomes
    }
}

impl Drop for InsertScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Debounce, re-check emptiness, then insert.
pub(crate) async fn run_pending(
    workspace: Arc<dyn Workspace>,
    delay: Duration,
    insertion: PendingInsertion,
) -> InsertOutcome {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    if !writer::is_empty(workspace.as_ref(), &insertion.path).await {
        tracing::debug!(
            "{} is no longer empty; leaving it untouched",
            insertion.path.display()
        );
        return InsertOutcome::SkippedNotEmpty;
    }

    if writer::insert(workspace.as_ref(), &insertion.path, &insertion.header).await {
        InsertOutcome::Inserted
    } else {
        InsertOutcome::Failed
    }
}
