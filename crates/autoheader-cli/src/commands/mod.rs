//! CLI command implementations for autoheader.
//!
//! Each module corresponds to a subcommand (`autoheader <command>`).

pub mod apply;
pub mod configure;
pub mod preview;
pub mod templates;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use autoheader_core::store::JsonFileStore;

/// Settings store for the given workspace.
pub(crate) fn open_store(workspace: &Path) -> Arc<JsonFileStore> {
    Arc::new(JsonFileStore::for_workspace(workspace))
}
