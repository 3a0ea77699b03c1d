use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use console::Term;

use autoheader_core::config;
use autoheader_core::handler::CreationHandler;
use autoheader_core::state::{self, SetupState};
use autoheader_core::store::{ConfigStore, Scope};
use autoheader_core::watcher::CreationWatcher;
use autoheader_core::workspace::FsWorkspace;

use crate::commands::{configure, open_store};
use crate::output;

/// Watch the workspace and insert headers into newly created empty files.
///
/// Runs until Ctrl-C. Insertions still waiting out their delay at shutdown
/// are dropped.
pub async fn run(workspace: &Path, delay_ms: u64, no_setup: bool) -> Result<()> {
    output::print_header("autoheader watch");

    let root = workspace
        .canonicalize()
        .with_context(|| format!("workspace {} not found", workspace.display()))?;
    let store = open_store(&root);

    if !no_setup {
        first_run_setup(store.as_ref());
    }

    let config = config::resolve(store.as_ref());
    output::print_key_value("Workspace", &root.display().to_string());
    output::print_key_value("Author", &config.identity.author);
    output::print_key_value("Delay", &format!("{delay_ms} ms"));
    if !config.enabled {
        output::print_warning("Header insertion is disabled (\"enabled\": false)");
    }

    let mut watcher = CreationWatcher::new(&root)?;
    let mut handler = CreationHandler::new(
        store,
        Arc::new(FsWorkspace::new()),
        Duration::from_millis(delay_ms),
    );
    output::print_success("Watching for new files (Ctrl-C to stop)");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            batch = watcher.next_batch() => {
                let Some(batch) = batch else {
                    tracing::warn!("watcher channel closed");
                    break;
                };
                let scheduled = handler.handle_batch(&batch);
                tracing::debug!("{} created, {scheduled} scheduled", batch.len());
            }
            _ = &mut ctrl_c => {
                println!();
                break;
            }
        }
    }

    handler.shutdown();
    output::print_success("Stopped");
    Ok(())
}

/// Offer the identity wizard once, on the first interactive run.
fn first_run_setup(store: &dyn ConfigStore) {
    let setup = match SetupState::default_path() {
        Some(path) => SetupState::load(&path).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable setup state: {e}");
            SetupState::default()
        }),
        None => SetupState::default(),
    };
    let interactive = Term::stdout().is_term();

    if !state::should_run_setup(setup, config::identity_configured(store), interactive) {
        return;
    }

    output::print_step(1, 1, "First run: set the identity used in headers");
    if let Err(e) = configure::wizard(store, Scope::Global) {
        output::print_warning(&format!("Setup skipped: {e:#}"));
    }
    configure::mark_setup_shown();
}
