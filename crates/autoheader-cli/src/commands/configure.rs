use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};
use serde_json::Value;

use autoheader_core::config::{self, Identity, KEY_AUTHOR, KEY_CONTACT, KEY_ORGANIZATION};
use autoheader_core::state::SetupState;
use autoheader_core::store::{ConfigStore, Scope};

use crate::commands::open_store;
use crate::output;

/// Configure identity: prompt for author, organization and contact.
///
/// Answers are pre-filled with the currently resolved values (the account-name
/// defaults on a fresh install) and written to the global settings, or to the
/// workspace settings with `--local`.
pub fn run(workspace: &Path, local: bool) -> Result<()> {
    output::print_header("autoheader configure");

    let store = open_store(workspace);
    let scope = if local { Scope::Local } else { Scope::Global };
    let target = match scope {
        Scope::Global => store.global_path(),
        Scope::Local => store.local_path(),
    };
    if let Some(path) = target {
        output::print_key_value("Settings", &path.display().to_string());
    }

    wizard(store.as_ref(), scope)?;
    mark_setup_shown();
    Ok(())
}

/// Ask for identity fields and store them. Shared with first-run setup.
pub fn wizard(store: &dyn ConfigStore, scope: Scope) -> Result<()> {
    let current = config::resolve(store).identity;

    let answers = Identity {
        author: ask("Author", &current.author)?,
        organization: ask("Organization", &current.organization)?,
        contact: ask("Contact (email)", &current.contact)?,
    };

    println!();
    output::print_key_value("Author", &answers.author);
    output::print_key_value("Organization", &answers.organization);
    output::print_key_value("Contact", &answers.contact);

    let save = Confirm::new()
        .with_prompt("Save these settings?")
        .default(true)
        .interact()?;
    if !save {
        output::print_warning("Nothing saved");
        return Ok(());
    }

    for (key, value) in [
        (KEY_AUTHOR, answers.author),
        (KEY_ORGANIZATION, answers.organization),
        (KEY_CONTACT, answers.contact),
    ] {
        store
            .update(key, Value::String(value), scope)
            .with_context(|| format!("saving '{key}'"))?;
    }

    output::print_success("Identity saved");
    Ok(())
}

fn ask(prompt: &str, initial: &str) -> Result<String> {
    let answer: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(answer.trim().to_string())
}

/// Record that the setup prompt has been shown. Failure only costs a repeat prompt.
pub fn mark_setup_shown() {
    let Some(path) = SetupState::default_path() else {
        return;
    };
    if let Err(e) = (SetupState { setup_shown: true }).save(&path) {
        tracing::warn!("could not record setup state at {}: {e}", path.display());
    }
}
