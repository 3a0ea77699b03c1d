use std::path::Path;

use anyhow::Result;

use autoheader_core::config;
use autoheader_core::templates::registry::{self, TemplateSource};

use crate::commands::open_store;
use crate::output;

/// List the extensions that have a template, built-in or custom.
pub fn run(workspace: &Path, json: bool) -> Result<()> {
    let store = open_store(workspace);
    let config = config::resolve(store.as_ref());
    let entries = registry::extensions(&config.custom_templates);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    output::print_header("autoheader templates");
    for entry in &entries {
        let source = match (entry.source, entry.overrides_builtin) {
            (TemplateSource::Builtin, _) => "built-in",
            (TemplateSource::Custom, true) => "custom (replaces built-in)",
            (TemplateSource::Custom, false) => "custom",
        };
        output::print_key_value(&format!("{:<6}", entry.extension), source);
    }
    Ok(())
}
