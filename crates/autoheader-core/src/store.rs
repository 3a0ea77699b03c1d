//! Layered key-value settings store.
//!
//! Settings live in two JSON objects: a global file under the user's config
//! directory and a local file inside the watched workspace. A local value
//! shadows the global one. Lookups report *where* a value came from, so callers
//! can tell "the user never set this" apart from "the user set it to the
//! default".
//!
//! ```text
//! <config_dir>/autoheader/settings.json     # Scope::Global
//! <workspace>/.autoheader/settings.json     # Scope::Local
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::error::{AutoHeaderError, Result};

const APP_DIR: &str = "autoheader";
const LOCAL_DIR: &str = ".autoheader";
const SETTINGS_FILE: &str = "settings.json";

/// Which settings layer a write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Local,
}

/// Result of looking up a single key.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    /// The key is absent (or `null`) in every layer.
    Unset,
    /// Set in the global layer only.
    Global(Value),
    /// Set in the local layer; any global value is shadowed.
    Local(Value),
}

impl Setting {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Setting::Unset => None,
            Setting::Global(v) | Setting::Local(v) => Some(v),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Setting::Unset)
    }

    fn from_layers(local: Option<&Value>, global: Option<&Value>) -> Self {
        match (local, global) {
            (Some(v), _) if !v.is_null() => Setting::Local(v.clone()),
            (_, Some(v)) if !v.is_null() => Setting::Global(v.clone()),
            _ => Setting::Unset,
        }
    }
}

/// Host-provided persistent key-value namespace.
pub trait ConfigStore: Send + Sync {
    /// Look up `key`, reporting which layer (if any) holds it.
    fn inspect(&self, key: &str) -> Result<Setting>;

    /// Write `key` into the given layer.
    fn update(&self, key: &str, value: Value, scope: Scope) -> Result<()>;
}

/// Default location of the global settings file.
pub fn global_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(SETTINGS_FILE))
}

/// Location of the workspace-local settings file.
pub fn local_settings_path(workspace: &Path) -> PathBuf {
    workspace.join(LOCAL_DIR).join(SETTINGS_FILE)
}

/// Settings backed by a global and a workspace-local JSON file.
///
/// Files are re-read on every lookup; there is no in-process cache, so edits
/// made while `watch` is running apply to the next batch.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    global: Option<PathBuf>,
    local: Option<PathBuf>,
}

impl JsonFileStore {
    pub fn new(global: Option<PathBuf>, local: Option<PathBuf>) -> Self {
        Self { global, local }
    }

    /// Store for `workspace`, using the platform config directory for the
    /// global layer.
    pub fn for_workspace(workspace: &Path) -> Self {
        Self::new(global_settings_path(), Some(local_settings_path(workspace)))
    }

    pub fn global_path(&self) -> Option<&Path> {
        self.global.as_deref()
    }

    pub fn local_path(&self) -> Option<&Path> {
        self.local.as_deref()
    }

    fn path_for(&self, scope: Scope) -> Result<&Path> {
        let path = match scope {
            Scope::Global => self.global.as_deref(),
            Scope::Local => self.local.as_deref(),
        };
        path.ok_or(AutoHeaderError::NoConfigDir)
    }
}

impl ConfigStore for JsonFileStore {
    fn inspect(&self, key: &str) -> Result<Setting> {
        let local = match &self.local {
            Some(p) => read_layer(p)?,
            None => Map::new(),
        };
        let global = match &self.global {
            Some(p) => read_layer(p)?,
            None => Map::new(),
        };
        Ok(Setting::from_layers(local.get(key), global.get(key)))
    }

    fn update(&self, key: &str, value: Value, scope: Scope) -> Result<()> {
        let path = self.path_for(scope)?;
        let mut layer = read_layer(path)?;
        layer.insert(key.to_string(), value);
        write_layer(path, &layer)
    }
}

/// Read one settings layer. A missing file is an empty layer.
fn read_layer(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_str(&contents).map_err(|e| AutoHeaderError::SettingsParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_layer(path: &Path, layer: &Map<String, Value>) -> Result<()> {
    let write_err = |source: std::io::Error| AutoHeaderError::SettingsWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = serde_json::to_string_pretty(layer).map_err(|e| AutoHeaderError::SettingsWrite {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    std::fs::write(path, json + "\n").map_err(write_err)
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    global: Mutex<HashMap<String, Value>>,
    local: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(self, key: &str, value: impl Into<Value>) -> Self {
        lock(&self.global).insert(key.to_string(), value.into());
        self
    }

    pub fn with_local(self, key: &str, value: impl Into<Value>) -> Self {
        lock(&self.local).insert(key.to_string(), value.into());
        self
    }
}

impl ConfigStore for MemoryStore {
    fn inspect(&self, key: &str) -> Result<Setting> {
        let local = lock(&self.local);
        let global = lock(&self.global);
        Ok(Setting::from_layers(local.get(key), global.get(key)))
    }

    fn update(&self, key: &str, value: Value, scope: Scope) -> Result<()> {
        let layer = match scope {
            Scope::Global => &self.global,
            Scope::Local => &self.local,
        };
        lock(layer).insert(key.to_string(), value);
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
