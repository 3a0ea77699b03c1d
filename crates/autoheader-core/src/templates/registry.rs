//! Extension-to-template lookup with user overrides.
//!
//! A user template replaces the built-in one for the same extension outright;
//! nothing is merged. Extensions compare case-insensitively.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::builtin::{builtin_template, BUILTIN_TEMPLATES};

/// Where a template for an extension comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSource {
    Builtin,
    Custom,
}

/// One covered extension, as listed by [`extensions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    pub extension: String,
    pub source: TemplateSource,
    /// A custom template that replaces a built-in one.
    pub overrides_builtin: bool,
}

/// Lowercased extension of `path` with a leading dot, e.g. `".py"`.
///
/// Returns `None` for names without an extension, dot-files such as
/// `.bashrc`, and names ending in a bare dot.
pub fn extension_of(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

/// Find the template for `extension`.
///
/// A non-empty custom template wins; otherwise the built-in table is
/// consulted. `None` means the extension is not covered and the file should
/// be skipped.
pub fn lookup<'a>(extension: &str, custom: &'a BTreeMap<String, String>) -> Option<&'a str> {
    let ext = extension.to_lowercase();
    custom_template(&ext, custom).or_else(|| builtin_template(&ext))
}

fn custom_template<'a>(ext: &str, custom: &'a BTreeMap<String, String>) -> Option<&'a str> {
    custom
        .iter()
        .filter(|(_, tmpl)| !tmpl.is_empty())
        .find(|(key, _)| key.to_lowercase() == ext)
        .map(|(_, tmpl)| tmpl.as_str())
}

/// All covered extensions, sorted.
pub fn extensions(custom: &BTreeMap<String, String>) -> Vec<TemplateEntry> {
    let mut entries: BTreeMap<String, TemplateEntry> = BUILTIN_TEMPLATES
        .iter()
        .map(|(ext, _)| {
            (
                ext.to_string(),
                TemplateEntry {
                    extension: ext.to_string(),
                    source: TemplateSource::Builtin,
                    overrides_builtin: false,
                },
            )
        })
        .collect();

    for (key, tmpl) in custom {
        if tmpl.is_empty() {
            continue;
        }
        let ext = key.to_lowercase();
        let overrides_builtin = builtin_template(&ext).is_some();
        entries.insert(
            ext.clone(),
            TemplateEntry {
                extension: ext,
                source: TemplateSource::Custom,
                overrides_builtin,
            },
        );
    }

    entries.into_values().collect()
}
