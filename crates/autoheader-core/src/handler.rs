//! Reaction to batches of newly created files.
//!
//! Deciding what to insert ([`plan_batch`]) is a pure function of the batch,
//! the configuration and a timestamp. [`CreationHandler`] wraps it with the
//! effects: reading settings, scheduling the delayed insertion, and writing.
//!
//! Per file: idle → evaluating → (skip | scheduled-insert) → idle. Files are
//! independent of each other; no ordering is kept within or across batches.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};

use crate::config::{self, Configuration};
use crate::scheduler::{self, InsertOutcome, InsertScheduler};
use crate::store::ConfigStore;
use crate::templates::{self, context::SubstitutionContext, registry};
use crate::workspace::Workspace;

/// A rendered header waiting to be written to `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInsertion {
    pub path: PathBuf,
    pub header: String,
}

/// Decide which files in `batch` get a header and render it.
///
/// Skips everything when disabled, and skips files without an extension or
/// without a template. Does not look at file contents.
pub fn plan_batch(
    batch: &[PathBuf],
    config: &Configuration,
    now: NaiveDateTime,
) -> Vec<PendingInsertion> {
    if !config.enabled {
        tracing::debug!("header insertion disabled; ignoring {} file(s)", batch.len());
        return Vec::new();
    }
    batch
        .iter()
        .filter_map(|path| plan_file(path, config, now))
        .collect()
}

fn plan_file(path: &Path, config: &Configuration, now: NaiveDateTime) -> Option<PendingInsertion> {
    let Some(extension) = registry::extension_of(path) else {
        tracing::debug!("skipping {}: no extension", path.display());
        return None;
    };
    let file_name = path.file_name()?.to_string_lossy();

    let ctx = SubstitutionContext::new(&file_name, &config.identity, now);
    let Some(header) = templates::header_for(&extension, &config.custom_templates, &ctx) else {
        tracing::debug!("skipping {}: no template for {extension}", path.display());
        return None;
    };

    Some(PendingInsertion {
        path: path.to_path_buf(),
        header,
    })
}

/// Reads settings for each batch and schedules insertions.
pub struct CreationHandler {
    store: Arc<dyn ConfigStore>,
    workspace: Arc<dyn Workspace>,
    scheduler: InsertScheduler,
}

impl CreationHandler {
    pub fn new(store: Arc<dyn ConfigStore>, workspace: Arc<dyn Workspace>, delay: Duration) -> Self {
        let scheduler = InsertScheduler::new(Arc::clone(&workspace), delay);
        Self {
            store,
            workspace,
            scheduler,
        }
    }

    /// Handle one creation notification. Returns how many insertions were
    /// scheduled.
    pub fn handle_batch(&mut self, batch: &[PathBuf]) -> usize {
        let config = config::resolve(self.store.as_ref());
        let planned = plan_batch(batch, &config, Local::now().naive_local());
        let count = planned.len();
        for insertion in planned {
            tracing::debug!(
                "scheduling header for {} in {:?}",
                insertion.path.display(),
                self.scheduler.delay()
            );
            self.scheduler.schedule(insertion);
        }
        count
    }

    /// Insert headers into `paths` right away, without the debounce delay.
    ///
    /// The emptiness gate still applies. Paths that are skipped during planning
    /// do not appear in the result.
    pub async fn apply_now(&self, paths: &[PathBuf]) -> Vec<(PathBuf, InsertOutcome)> {
        let config = config::resolve(self.store.as_ref());
        let planned = plan_batch(paths, &config, Local::now().naive_local());

        let mut outcomes = Vec::with_capacity(planned.len());
        for insertion in planned {
            let path = insertion.path.clone();
            let outcome =
                scheduler::run_pending(Arc::clone(&self.workspace), Duration::ZERO, insertion)
                    .await;
            outcomes.push((path, outcome));
        }
        outcomes
    }

    pub fn scheduler(&mut self) -> &mut InsertScheduler {
        &mut self.scheduler
    }

    /// Drop every insertion that has not fired yet.
    pub fn shutdown(&mut self) {
        let dropped = self.scheduler.pending();
        if dropped > 0 {
            tracing::info!("dropping {dropped} pending insertion(s)");
        }
        self.scheduler.cancel_all();
    }
}
