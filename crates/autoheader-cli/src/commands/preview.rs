use std::path::Path;

use anyhow::Result;

use autoheader_core::config;
use autoheader_core::templates::{self, context::SubstitutionContext, registry};

use crate::commands::open_store;

/// Print the header a new file named `file_name` would receive.
///
/// Output goes to stdout unstyled so it can be piped into a file.
pub fn run(workspace: &Path, file_name: &str) -> Result<()> {
    let store = open_store(workspace);
    let config = config::resolve(store.as_ref());

    let Some(extension) = registry::extension_of(Path::new(file_name)) else {
        anyhow::bail!("'{file_name}' has no extension");
    };

    let ctx = SubstitutionContext::now(file_name, &config.identity);
    match templates::header_for(&extension, &config.custom_templates, &ctx) {
        Some(header) => {
            print!("{header}");
            if !config.enabled {
                tracing::warn!("header insertion is currently disabled");
            }
            Ok(())
        }
        None => anyhow::bail!("no template for '{extension}' (see `autoheader templates`)"),
    }
}
