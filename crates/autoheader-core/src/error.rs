//! Unified error types for autoheader.
//!
//! Most failures in the header pipeline are never surfaced: settings fall back
//! to defaults, unreadable files count as non-empty, and failed writes are
//! logged and dropped. These variants cover the paths that can still fail a
//! command, such as writing settings or starting the watcher.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during autoheader operations.
#[derive(Error, Debug)]
pub enum AutoHeaderError {
    // --- Settings ---

    /// A settings or state file exists but contains invalid JSON.
    #[error("failed to parse settings at {path}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A settings or state file could not be serialized or written.
    #[error("failed to write settings at {path}")]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A setting holds a value of the wrong shape (e.g. `enabled: "yes"`).
    #[error("invalid value for setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// No platform configuration directory could be determined.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    // --- Workspace ---

    /// `save` was called for a path with no staged edits.
    #[error("no open document for {0}")]
    NotOpen(PathBuf),

    /// An insertion offset lies past the end of the document.
    #[error("offset {offset} is out of bounds for {path} ({len} chars)")]
    OffsetOutOfBounds {
        path: PathBuf,
        offset: usize,
        len: usize,
    },

    // --- Watcher ---

    /// The filesystem watcher could not be created or attached.
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, AutoHeaderError>`.
pub type Result<T> = std::result::Result<T, AutoHeaderError>;
