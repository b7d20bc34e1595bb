//! Per-target key-value context store.
//!
//! An injected collaborator, never global state inside the protocol:
//! the `context` subcommands read and write it, and the readiness gate
//! consults it for an installed prompt marker. File-backed JSON with
//! atomic temp-file + rename writes.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context key the readiness gate looks up for an installed prompt.
pub const PROMPT_MARKER_KEY: &str = "prompt_marker";

/// Key-value metadata scoped by target, behind a trait so tests and
/// embedders can substitute their own backing.
pub trait ContextStore {
    fn get(&self, target: &str, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, target: &str, key: &str, value: &str) -> anyhow::Result<()>;
    fn delete(&self, target: &str, key: &str) -> anyhow::Result<bool>;
    fn list(&self, target: Option<&str>) -> anyhow::Result<serde_json::Value>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    value: String,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    targets: BTreeMap<String, BTreeMap<String, Entry>>,
}

/// JSON file store. Reads tolerate a missing file; writes go through a
/// temp file in the same directory and an atomic rename so the store is
/// never observed half-written.
pub struct FileContextStore {
    path: PathBuf,
}

impl FileContextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> anyhow::Result<StoreFile> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data)
                .with_context(|| format!("corrupt context store at {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn save(&self, store: &StoreFile) -> anyhow::Result<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("temp file in {}", parent.display()))?;
        let json = serde_json::to_string_pretty(store)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl ContextStore for FileContextStore {
    fn get(&self, target: &str, key: &str) -> anyhow::Result<Option<String>> {
        let store = self.load()?;
        Ok(store
            .targets
            .get(target)
            .and_then(|entries| entries.get(key))
            .map(|e| e.value.clone()))
    }

    fn set(&self, target: &str, key: &str, value: &str) -> anyhow::Result<()> {
        let mut store = self.load()?;
        store.targets.entry(target.to_string()).or_default().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );
        self.save(&store)
    }

    fn delete(&self, target: &str, key: &str) -> anyhow::Result<bool> {
        let mut store = self.load()?;
        let Some(entries) = store.targets.get_mut(target) else {
            return Ok(false);
        };
        let removed = entries.remove(key).is_some();
        if entries.is_empty() {
            store.targets.remove(target);
        }
        if removed {
            self.save(&store)?;
        }
        Ok(removed)
    }

    fn list(&self, target: Option<&str>) -> anyhow::Result<serde_json::Value> {
        let store = self.load()?;
        let value = match target {
            Some(t) => serde_json::to_value(store.targets.get(t).cloned().unwrap_or_default())?,
            None => serde_json::to_value(&store.targets)?,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileContextStore {
        FileContextStore::new(dir.path().join("context.json"))
    }

    #[test]
    fn get_on_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        assert_eq!(store.get("main:0.0", "label").expect("ok"), None);
    }

    #[test]
    fn set_get_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.set("main:0.0", "label", "build pane").expect("ok");
        assert_eq!(
            store.get("main:0.0", "label").expect("ok").as_deref(),
            Some("build pane")
        );
        // Other targets are untouched.
        assert_eq!(store.get("main:0.1", "label").expect("ok"), None);
    }

    #[test]
    fn set_overwrites_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.set("main", "label", "old").expect("ok");
        store.set("main", "label", "new").expect("ok");
        assert_eq!(store.get("main", "label").expect("ok").as_deref(), Some("new"));
    }

    #[test]
    fn delete_reports_presence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.set("main", "label", "x").expect("ok");
        assert!(store.delete("main", "label").expect("ok"));
        assert!(!store.delete("main", "label").expect("ok"));
        assert_eq!(store.get("main", "label").expect("ok"), None);
    }

    #[test]
    fn list_scoped_and_full() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.set("main", "label", "a").expect("ok");
        store.set("work", PROMPT_MARKER_KEY, "::ready::").expect("ok");

        let scoped = store.list(Some("main")).expect("ok");
        assert_eq!(scoped["label"]["value"], "a");
        assert!(scoped.get(PROMPT_MARKER_KEY).is_none());

        let full = store.list(None).expect("ok");
        assert_eq!(full["work"][PROMPT_MARKER_KEY]["value"], "::ready::");
    }

    #[test]
    fn persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        store_in(&dir).set("main", "k", "v").expect("ok");
        assert_eq!(
            store_in(&dir).get("main", "k").expect("ok").as_deref(),
            Some("v")
        );
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_wipe() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("context.json");
        std::fs::write(&path, "{ not json").expect("write");
        let store = FileContextStore::new(&path);
        assert!(store.get("main", "k").is_err());
        assert!(store.set("main", "k", "v").is_err());
        // The corrupt original is still on disk for inspection.
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "{ not json");
    }
}
