//! Header templates: the built-in table, per-extension lookup and rendering.
//!
//! Built-in templates are embedded into the binary at compile-time via
//! [`include_str!`] in the [`builtin`] module. User templates from the
//! `customTemplates` setting take precedence per extension ([`registry`]).
//! Rendering is plain `${name}` substitution ([`renderer`]) against a
//! [`context::SubstitutionContext`].
//!
//! ## Template variables
//!
//! - `${fileName}`, `${fileNameWithoutExt}`
//! - `${author}`, `${organization}`, `${contact}`
//! - `${datetime}` (`Thu Mar 07 2024 09:05:01`), `${date}` (`2024/3/7`),
//!   `${dateISO}` (`2024-03-07`), `${year}`, `${month}`, `${day}`
//!
//! **Warning**: Template files in `templates/headers/` and constants in
//! [`builtin`] must stay in sync. The `include_str!` paths are relative to the
//! source file and checked at compile-time.

pub mod builtin;
pub mod context;
pub mod registry;
pub mod renderer;

use std::collections::BTreeMap;

use context::SubstitutionContext;

/// Look up the template for `extension` and render it, or `None` if the
/// extension is not covered.
pub fn header_for(
    extension: &str,
    custom: &BTreeMap<String, String>,
    ctx: &SubstitutionContext,
) -> Option<String> {
    registry::lookup(extension, custom).map(|tmpl| renderer::render(tmpl, ctx))
}
