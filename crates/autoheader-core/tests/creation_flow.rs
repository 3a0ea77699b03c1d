//! End-to-end creation handling against in-memory settings and files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use autoheader_core::config::{KEY_AUTHOR, KEY_CONTACT, KEY_CUSTOM_TEMPLATES, KEY_ENABLED, KEY_ORGANIZATION};
use autoheader_core::handler::CreationHandler;
use autoheader_core::scheduler::{InsertOutcome, DEFAULT_DELAY};
use autoheader_core::store::{ConfigStore, MemoryStore, Scope};
use autoheader_core::workspace::{FsWorkspace, MemoryWorkspace};

fn identity_store() -> MemoryStore {
    MemoryStore::new()
        .with_global(KEY_AUTHOR, "A. Lin")
        .with_global(KEY_ORGANIZATION, "Acme")
        .with_global(KEY_CONTACT, "lin@acme.test")
}

fn batch(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[tokio::test(start_paused = true)]
async fn test_only_known_extension_receives_header() {
    let ws = Arc::new(
        MemoryWorkspace::new()
            .with_file("/ws/a.py", "")
            .with_file("/ws/b.xyz", ""),
    );
    let mut handler = CreationHandler::new(Arc::new(identity_store()), ws.clone(), DEFAULT_DELAY);

    assert_eq!(handler.handle_batch(&batch(&["/ws/a.py", "/ws/b.xyz"])), 1);
    let outcomes = handler.scheduler().drain().await;

    assert_eq!(outcomes, vec![(PathBuf::from("/ws/a.py"), InsertOutcome::Inserted)]);
    let py = ws.content(Path::new("/ws/a.py")).unwrap();
    assert!(py.starts_with("# -*- coding: utf-8 -*-\n"));
    assert!(py.contains("Author:       A. Lin\n"));
    assert!(py.contains("Organization: Acme\n"));
    assert!(py.contains("Contact:      lin@acme.test\n"));
    assert_eq!(ws.content(Path::new("/ws/b.xyz")).as_deref(), Some(""));
}

#[tokio::test(start_paused = true)]
async fn test_disabled_inserts_nothing() {
    let store = identity_store().with_global(KEY_ENABLED, false);
    let ws = Arc::new(
        MemoryWorkspace::new()
            .with_file("/ws/a.rs", "")
            .with_file("/ws/b.md", ""),
    );
    let mut handler = CreationHandler::new(Arc::new(store), ws.clone(), DEFAULT_DELAY);

    assert_eq!(handler.handle_batch(&batch(&["/ws/a.rs", "/ws/b.md"])), 0);
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(ws.content(Path::new("/ws/a.rs")).as_deref(), Some(""));
    assert_eq!(ws.content(Path::new("/ws/b.md")).as_deref(), Some(""));
}

#[tokio::test(start_paused = true)]
async fn test_settings_changes_apply_to_next_batch() {
    let store = Arc::new(identity_store());
    let ws = Arc::new(
        MemoryWorkspace::new()
            .with_file("/ws/one.rs", "")
            .with_file("/ws/two.rs", ""),
    );
    let mut handler = CreationHandler::new(store.clone(), ws.clone(), DEFAULT_DELAY);

    handler.handle_batch(&batch(&["/ws/one.rs"]));
    handler.scheduler().drain().await;

    store
        .update(KEY_ENABLED, json!(false), Scope::Local)
        .unwrap();
    assert_eq!(handler.handle_batch(&batch(&["/ws/two.rs"])), 0);

    assert!(ws.content(Path::new("/ws/one.rs")).unwrap().contains("@author A. Lin"));
    assert_eq!(ws.content(Path::new("/ws/two.rs")).as_deref(), Some(""));
}

#[tokio::test(start_paused = true)]
async fn test_populated_during_delay_is_left_alone() {
    let ws = Arc::new(MemoryWorkspace::new().with_file("/ws/main.c", ""));
    let mut handler = CreationHandler::new(Arc::new(identity_store()), ws.clone(), DEFAULT_DELAY);

    handler.handle_batch(&batch(&["/ws/main.c"]));
    ws.set_content("/ws/main.c", "int main(void) { return 0; }\n");

    let outcomes = handler.scheduler().drain().await;
    assert_eq!(outcomes[0].1, InsertOutcome::SkippedNotEmpty);
    assert_eq!(
        ws.content(Path::new("/ws/main.c")).as_deref(),
        Some("int main(void) { return 0; }\n")
    );
}

#[tokio::test(start_paused = true)]
async fn test_failure_does_not_affect_other_files() {
    let ws = Arc::new(
        MemoryWorkspace::new()
            .with_file("/ws/ok.go", "")
            .with_file("/ws/ok.java", ""),
    );
    let mut handler = CreationHandler::new(Arc::new(identity_store()), ws.clone(), DEFAULT_DELAY);

    // gone.ts cannot be read when the delay elapses; the others are still written.
    handler.handle_batch(&batch(&["/ws/gone.ts", "/ws/ok.go", "/ws/ok.java"]));
    let outcomes = handler.scheduler().drain().await;

    assert_eq!(
        outcomes,
        vec![
            (PathBuf::from("/ws/gone.ts"), InsertOutcome::SkippedNotEmpty),
            (PathBuf::from("/ws/ok.go"), InsertOutcome::Inserted),
            (PathBuf::from("/ws/ok.java"), InsertOutcome::Inserted),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_custom_template_replaces_builtin() {
    let store = identity_store().with_local(
        KEY_CUSTOM_TEMPLATES,
        json!({ ".py": "# ${fileName} by ${author} on ${dateISO}\n" }),
    );
    let ws = Arc::new(MemoryWorkspace::new().with_file("/ws/tool.py", ""));
    let mut handler = CreationHandler::new(Arc::new(store), ws.clone(), DEFAULT_DELAY);

    handler.handle_batch(&batch(&["/ws/tool.py"]));
    handler.scheduler().drain().await;

    let text = ws.content(Path::new("/ws/tool.py")).unwrap();
    assert!(text.starts_with("# tool.py by A. Lin on "));
    assert!(!text.contains("coding: utf-8"));
    assert_eq!(text.lines().count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_drops_pending() {
    let ws = Arc::new(MemoryWorkspace::new().with_file("/ws/late.rs", ""));
    let mut handler = CreationHandler::new(Arc::new(identity_store()), ws.clone(), DEFAULT_DELAY);

    handler.handle_batch(&batch(&["/ws/late.rs"]));
    handler.shutdown();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(ws.content(Path::new("/ws/late.rs")).as_deref(), Some(""));
}

#[tokio::test]
async fn test_apply_now_on_real_files() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.rs");
    let full = dir.path().join("full.rs");
    let plain = dir.path().join("README");
    std::fs::write(&empty, "\n").unwrap();
    std::fs::write(&full, "fn main() {}\n").unwrap();
    std::fs::write(&plain, "").unwrap();

    let handler = CreationHandler::new(
        Arc::new(identity_store()),
        Arc::new(FsWorkspace::new()),
        DEFAULT_DELAY,
    );
    let outcomes = handler
        .apply_now(&[empty.clone(), full.clone(), plain.clone()])
        .await;

    assert_eq!(
        outcomes,
        vec![
            (empty.clone(), InsertOutcome::Inserted),
            (full.clone(), InsertOutcome::SkippedNotEmpty),
        ]
    );

    // Whitespace-only counts as empty, so the header goes ahead of the newline.
    let text = std::fs::read_to_string(&empty).unwrap();
    assert!(text.starts_with("/**\n * @file empty.rs\n"));
    assert!(text.ends_with(" */\n\n\n\n"));
    assert_eq!(std::fs::read_to_string(&full).unwrap(), "fn main() {}\n");
    assert_eq!(std::fs::read_to_string(&plain).unwrap(), "");
}
