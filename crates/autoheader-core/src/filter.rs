//! Which created paths the watcher should hand on.
//!
//! Files created by package managers, build tools or version control are not
//! user-authored sources and never get a header. A path under the watched
//! root is ignored when any component below the root
//!
//! - is hidden (`.git`, `.venv`, `.autoheader`, ...),
//! - names a vendor or build directory from [`DEFAULT_IGNORES`], or
//! - matches a pattern from the root `.gitignore`.
//!
//! Patterns are matched per path component with a single leading or trailing
//! `*`. Negated (`!`) gitignore patterns are not supported and are skipped.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Directory and file patterns ignored in every workspace.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    "target",
    "__pycache__",
    "*.pyc",
    "venv",
    "vendor",
    "dist",
    "build",
    "site-packages",
    "bower_components",
];

#[derive(Debug, Clone)]
pub struct PathFilter {
    root: PathBuf,
    patterns: HashSet<String>,
    /// Gitignore patterns containing a `/`, matched against the path
    /// relative to the root.
    anchored: Vec<PathBuf>,
}

impl PathFilter {
    /// Filter for `root`, with the default ignores plus the root `.gitignore`.
    pub fn new(root: &Path) -> Self {
        let mut filter = Self {
            root: root.to_path_buf(),
            patterns: DEFAULT_IGNORES.iter().map(|p| p.to_string()).collect(),
            anchored: Vec::new(),
        };
        for pattern in load_gitignore_patterns(root) {
            filter.add_pattern(&pattern);
        }
        filter
    }

    fn add_pattern(&mut self, pattern: &str) {
        let trimmed = pattern.trim_matches('/');
        if trimmed.is_empty() {
            return;
        }
        if trimmed.contains('/') {
            self.anchored.push(PathBuf::from(trimmed));
        } else {
            self.patterns.insert(trimmed.to_string());
        }
    }

    /// Whether a created `path` should be left alone.
    ///
    /// Paths outside the root are never ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };

        if self.anchored.iter().any(|prefix| relative.starts_with(prefix)) {
            return true;
        }

        relative.components().any(|component| match component {
            Component::Normal(name) => name.to_str().is_some_and(|name| {
                name.starts_with('.') || self.patterns.iter().any(|p| matches_pattern(name, p))
            }),
            _ => false,
        })
    }
}

/// Match one path component against a pattern with an optional `*` at
/// either end.
fn matches_pattern(name: &str, pattern: &str) -> bool {
    match (pattern.strip_prefix('*'), pattern.strip_suffix('*')) {
        (Some(rest), _) if rest.ends_with('*') => name.contains(&rest[..rest.len() - 1]),
        (Some(suffix), _) => name.ends_with(suffix),
        (None, Some(prefix)) => name.starts_with(prefix),
        (None, None) => name == pattern,
    }
}

/// Non-comment, non-negated lines of `<root>/.gitignore`.
fn load_gitignore_patterns(root: &Path) -> Vec<String> {
    let path = root.join(".gitignore");
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Vec::new();
    };
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .map(str::to_string)
        .collect()
}
