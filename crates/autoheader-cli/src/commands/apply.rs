use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use autoheader_core::handler::CreationHandler;
use autoheader_core::scheduler::{InsertOutcome, DEFAULT_DELAY};
use autoheader_core::workspace::FsWorkspace;

use crate::commands::open_store;
use crate::output;

/// Add headers to the given files immediately.
///
/// Uses the same rules as `watch`: the file must be empty and its extension
/// must have a template. Files that don't qualify are reported and left alone.
pub async fn run(workspace: &Path, files: &[PathBuf]) -> Result<()> {
    output::print_header("autoheader apply");

    let handler = CreationHandler::new(
        open_store(workspace),
        Arc::new(FsWorkspace::new()),
        DEFAULT_DELAY,
    );
    let outcomes = handler.apply_now(files).await;

    let mut inserted = 0;
    for file in files {
        let shown = file.display().to_string();
        match outcomes.iter().find(|(p, _)| p == file).map(|(_, o)| *o) {
            Some(InsertOutcome::Inserted) => {
                inserted += 1;
                output::print_success(&shown);
            }
            Some(InsertOutcome::SkippedNotEmpty) => {
                output::print_warning(&format!("{shown}: not empty, skipped"));
            }
            Some(InsertOutcome::Failed) | Some(InsertOutcome::Cancelled) => {
                output::print_error(&format!("{shown}: could not write header"));
            }
            None => {
                output::print_warning(&format!("{shown}: no template (or disabled), skipped"));
            }
        }
    }

    println!();
    output::print_key_value("Inserted", &format!("{inserted}/{}", files.len()));
    Ok(())
}
