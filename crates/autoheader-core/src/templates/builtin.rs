//! Compile-time embedded header templates.
//!
//! Each constant loads a template file from `templates/headers/` via
//! [`include_str!`]. The paths are relative to this source file
//! (`crates/autoheader-core/src/templates/builtin.rs`).
//!
//! ## Adding a language
//!
//! 1. Reuse a comment style below, or add a `.tmpl` file under `templates/headers/`
//!    with a matching `pub const`
//! 2. Add the extension (lowercase, leading dot) to [`BUILTIN_TEMPLATES`]
//!
//! Do NOT strip trailing whitespace from the template files; the blank
//! `@brief`/`Description` continuation lines are part of the header layout.

// -------------------------------------------------------
// Comment styles
// -------------------------------------------------------

/// `/** ... */` doc block for C-family languages and stylesheets.
pub const C_BLOCK: &str = include_str!("../../../../templates/headers/c_block.tmpl");

/// Encoding line plus a triple-quoted module docstring.
pub const PYTHON: &str = include_str!("../../../../templates/headers/python.tmpl");

/// `%` banner for MATLAB/Octave.
pub const MATLAB: &str = include_str!("../../../../templates/headers/matlab.tmpl");

/// `!` banner for Fortran.
pub const FORTRAN: &str = include_str!("../../../../templates/headers/fortran.tmpl");

/// `<!-- ... -->` comment block for HTML pages.
pub const HTML: &str = include_str!("../../../../templates/headers/html.tmpl");

/// YAML front matter for Markdown documents.
pub const MARKDOWN: &str = include_str!("../../../../templates/headers/markdown.tmpl");

// -------------------------------------------------------
// Extension table
// -------------------------------------------------------

/// Built-in templates keyed by lowercase extension, sorted by key.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (".c", C_BLOCK),
    (".cpp", C_BLOCK),
    (".css", C_BLOCK),
    (".f", FORTRAN),
    (".f90", FORTRAN),
    (".f95", FORTRAN),
    (".for", FORTRAN),
    (".go", C_BLOCK),
    (".h", C_BLOCK),
    (".hpp", C_BLOCK),
    (".html", HTML),
    (".java", C_BLOCK),
    (".js", C_BLOCK),
    (".jsx", C_BLOCK),
    (".less", C_BLOCK),
    (".m", MATLAB),
    (".md", MARKDOWN),
    (".py", PYTHON),
    (".rs", C_BLOCK),
    (".scss", C_BLOCK),
    (".ts", C_BLOCK),
    (".tsx", C_BLOCK),
];

/// Look up a built-in template. `extension` must already be lowercase.
pub fn builtin_template(extension: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .binary_search_by(|(ext, _)| (*ext).cmp(extension))
        .ok()
        .map(|i| BUILTIN_TEMPLATES[i].1)
}
