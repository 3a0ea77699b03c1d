//! Resolution of the effective configuration from a [`ConfigStore`].
//!
//! The configuration is rebuilt from the store on every creation batch and is
//! never cached. Resolution does not fail: unreadable or mistyped settings
//! are logged and treated as unset.
//!
//! When none of `author`, `organization` or `contact` has been set in any
//! layer, identity falls back to values derived from the OS account name.
//! Once any of the three is set, the remaining unset ones resolve to empty
//! strings.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::account;
use crate::error::AutoHeaderError;
use crate::store::{ConfigStore, Setting};

pub const KEY_ENABLED: &str = "enabled";
pub const KEY_AUTHOR: &str = "author";
pub const KEY_ORGANIZATION: &str = "organization";
pub const KEY_CONTACT: &str = "contact";
pub const KEY_CUSTOM_TEMPLATES: &str = "customTemplates";

/// Identity keys, in prompt order.
pub const IDENTITY_KEYS: [&str; 3] = [KEY_AUTHOR, KEY_ORGANIZATION, KEY_CONTACT];

/// Organization used when no identity is configured.
pub const DEFAULT_ORGANIZATION: &str = "Your Organization";

/// Domain appended to the account name for the default contact.
pub const DEFAULT_CONTACT_DOMAIN: &str = "example.com";

/// The three identity fields substituted into headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub author: String,
    pub organization: String,
    pub contact: String,
}

impl Identity {
    /// Identity derived from an OS account name.
    pub fn from_account(account: &str) -> Self {
        Self {
            author: account.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            contact: format!("{account}@{DEFAULT_CONTACT_DOMAIN}"),
        }
    }
}

/// Effective settings for one creation batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub enabled: bool,
    #[serde(flatten)]
    pub identity: Identity,
    /// Extension (e.g. `".py"`) to template overrides.
    pub custom_templates: BTreeMap<String, String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enabled: true,
            identity: Identity::default(),
            custom_templates: BTreeMap::new(),
        }
    }
}

/// Resolve the configuration, using the real account name for fallbacks.
pub fn resolve(store: &dyn ConfigStore) -> Configuration {
    resolve_with(store, account::account_name)
}

/// Resolve the configuration with a custom account-name source.
///
/// `account` is only called when the identity fallback applies.
pub fn resolve_with(store: &dyn ConfigStore, account: impl FnOnce() -> String) -> Configuration {
    let enabled = read_bool(store, KEY_ENABLED).unwrap_or(true);

    let author = read_string(store, KEY_AUTHOR);
    let organization = read_string(store, KEY_ORGANIZATION);
    let contact = read_string(store, KEY_CONTACT);

    let identity = if author.is_none() && organization.is_none() && contact.is_none() {
        Identity::from_account(&account())
    } else {
        Identity {
            author: author.unwrap_or_default(),
            organization: organization.unwrap_or_default(),
            contact: contact.unwrap_or_default(),
        }
    };

    Configuration {
        enabled,
        identity,
        custom_templates: read_templates(store),
    }
}

/// Whether the user has set any identity field in any layer.
pub fn identity_configured(store: &dyn ConfigStore) -> bool {
    IDENTITY_KEYS
        .iter()
        .any(|key| inspect(store, key).is_set())
}

fn inspect(store: &dyn ConfigStore, key: &str) -> Setting {
    match store.inspect(key) {
        Ok(setting) => setting,
        Err(e) => {
            tracing::warn!("could not read setting '{key}': {e}");
            Setting::Unset
        }
    }
}

fn invalid(key: &str, reason: String) -> AutoHeaderError {
    AutoHeaderError::InvalidSetting {
        key: key.to_string(),
        reason,
    }
}

fn read_bool(store: &dyn ConfigStore, key: &str) -> Option<bool> {
    let setting = inspect(store, key);
    let value = setting.value()?;
    match value.as_bool() {
        Some(b) => Some(b),
        None => {
            let err = invalid(key, format!("expected a boolean, got {value}"));
            tracing::warn!("{err}; ignoring");
            None
        }
    }
}

/// `Some` whenever the key is set, even to an empty string.
fn read_string(store: &dyn ConfigStore, key: &str) -> Option<String> {
    let setting = inspect(store, key);
    let value = setting.value()?;
    match value {
        Value::String(s) => Some(s.clone()),
        other => {
            tracing::warn!("setting '{key}' should be a string, got {other}; using it as text");
            Some(other.to_string())
        }
    }
}

fn read_templates(store: &dyn ConfigStore) -> BTreeMap<String, String> {
    let setting = inspect(store, KEY_CUSTOM_TEMPLATES);
    let Some(value) = setting.value() else {
        return BTreeMap::new();
    };
    let Some(map) = value.as_object() else {
        let err = invalid(KEY_CUSTOM_TEMPLATES, format!("expected an object, got {value}"));
        tracing::warn!("{err}; ignoring");
        return BTreeMap::new();
    };

    map.iter()
        .filter_map(|(ext, tmpl)| match tmpl.as_str() {
            Some(s) => Some((ext.clone(), s.to_string())),
            None => {
                tracing::warn!("custom template for '{ext}' is not a string; skipping");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Scope};
    use serde_json::json;

    fn never() -> String {
        panic!("account lookup should not run when identity is configured")
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let store = MemoryStore::new();
        let config = resolve_with(&store, || "alice".to_string());
        assert!(config.enabled);
        assert_eq!(config.identity.author, "alice");
        assert_eq!(config.identity.organization, DEFAULT_ORGANIZATION);
        assert_eq!(config.identity.contact, "alice@example.com");
        assert!(config.custom_templates.is_empty());
    }

    #[test]
    fn test_partial_identity_disables_fallback() {
        let store = MemoryStore::new().with_global(KEY_AUTHOR, "A. Lin");
        let config = resolve_with(&store, never);
        assert_eq!(config.identity.author, "A. Lin");
        assert_eq!(config.identity.organization, "");
        assert_eq!(config.identity.contact, "");
    }

    #[test]
    fn test_explicit_empty_author_counts_as_set() {
        let store = MemoryStore::new().with_local(KEY_AUTHOR, "");
        let config = resolve_with(&store, never);
        assert_eq!(config.identity.author, "");
        assert!(identity_configured(&store));
    }

    #[test]
    fn test_enabled_false() {
        let store = MemoryStore::new().with_global(KEY_ENABLED, false);
        assert!(!resolve_with(&store, || "x".into()).enabled);
    }

    #[test]
    fn test_enabled_wrong_type_falls_back_to_true() {
        let store = MemoryStore::new().with_global(KEY_ENABLED, "no");
        assert!(resolve_with(&store, || "x".into()).enabled);
    }

    #[test]
    fn test_custom_templates_read() {
        let store = MemoryStore::new().with_global(
            KEY_CUSTOM_TEMPLATES,
            json!({ ".py": "# ${author}\n", ".sh": 42 }),
        );
        let config = resolve_with(&store, || "x".into());
        assert_eq!(config.custom_templates.len(), 1);
        assert_eq!(config.custom_templates[".py"], "# ${author}\n");
    }

    #[test]
    fn test_local_overrides_global_per_key() {
        let store = MemoryStore::new()
            .with_global(KEY_AUTHOR, "Global")
            .with_global(KEY_CONTACT, "g@example.org");
        store.update(KEY_AUTHOR, json!("Local"), Scope::Local).unwrap();

        let config = resolve_with(&store, never);
        assert_eq!(config.identity.author, "Local");
        assert_eq!(config.identity.contact, "g@example.org");
    }

    #[test]
    fn test_store_error_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[broken").unwrap();
        let store = crate::store::JsonFileStore::new(Some(path), None);

        let config = resolve_with(&store, || "bob".into());
        assert!(config.enabled);
        assert_eq!(config.identity.author, "bob");
        assert!(!identity_configured(&store));
    }

    #[test]
    fn test_configuration_serializes_with_store_keys() {
        let config = Configuration::default();
        let value = serde_json::to_value(&config).unwrap();
        for key in [KEY_ENABLED, KEY_AUTHOR, KEY_ORGANIZATION, KEY_CONTACT, KEY_CUSTOM_TEMPLATES] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
