//! Persisted one-shot state, kept apart from user settings.
//!
//! Saved to `<config_dir>/autoheader/state.json`. The only field today records
//! whether the first-run setup wizard has been shown.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AutoHeaderError, Result};

const STATE_FILE: &str = "state.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupState {
    #[serde(default)]
    pub setup_shown: bool,
}

impl SetupState {
    /// Default location of the state file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("autoheader").join(STATE_FILE))
    }

    /// Load state from `path`. A missing file yields the default state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| AutoHeaderError::SettingsParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| AutoHeaderError::SettingsWrite {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Decide whether to run the first-run wizard.
///
/// Only offered once, only when no identity field is configured yet, and only
/// when someone is at the terminal to answer.
pub fn should_run_setup(state: SetupState, identity_configured: bool, interactive: bool) -> bool {
    !state.setup_shown && !identity_configured && interactive
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_run_setup_first_time() {
        assert!(should_run_setup(SetupState::default(), false, true));
    }

    #[test]
    fn test_should_not_run_setup_twice() {
        let state = SetupState { setup_shown: true };
        assert!(!should_run_setup(state, false, true));
    }

    #[test]
    fn test_should_not_run_setup_when_identity_set() {
        assert!(!should_run_setup(SetupState::default(), true, true));
    }

    #[test]
    fn test_should_not_run_setup_non_interactive() {
        assert!(!should_run_setup(SetupState::default(), false, false));
    }

    #[test]
    fn test_state_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state.json");
        SetupState { setup_shown: true }.save(&path).unwrap();
        assert!(SetupState::load(&path).unwrap().setup_shown);
    }

    #[test]
    fn test_state_load_missing_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let state = SetupState::load(&dir.path().join("state.json")).unwrap();
        assert!(!state.setup_shown);
    }

    #[test]
    fn test_state_uses_camel_case_key() {
        let json = serde_json::to_string(&SetupState { setup_shown: true }).unwrap();
        assert_eq!(json, r#"{"setupShown":true}"#);
    }
}
