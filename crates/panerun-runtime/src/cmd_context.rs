//! `panerun context` — per-target key-value metadata.

use crate::cli::ContextAction;
use crate::store::ContextStore;

pub fn cmd_context(store: &dyn ContextStore, action: &ContextAction) -> anyhow::Result<i32> {
    match action {
        ContextAction::Get { target, key } => match store.get(target, key)? {
            Some(value) => {
                println!("{value}");
                Ok(0)
            }
            None => {
                eprintln!("panerun: no value for {key:?} on {target}");
                Ok(1)
            }
        },
        ContextAction::Set { target, key, value } => {
            store.set(target, key, value)?;
            Ok(0)
        }
        ContextAction::Delete { target, key } => {
            if store.delete(target, key)? {
                Ok(0)
            } else {
                eprintln!("panerun: no value for {key:?} on {target}");
                Ok(1)
            }
        }
        ContextAction::List { target } => {
            let entries = store.list(target.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileContextStore;

    fn action_set(target: &str, key: &str, value: &str) -> ContextAction {
        ContextAction::Set {
            target: target.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn set_get_delete_exit_codes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileContextStore::new(dir.path().join("context.json"));

        assert_eq!(
            cmd_context(&store, &action_set("main", "label", "build")).expect("ok"),
            0
        );
        let get = ContextAction::Get {
            target: "main".to_string(),
            key: "label".to_string(),
        };
        assert_eq!(cmd_context(&store, &get).expect("ok"), 0);

        let del = ContextAction::Delete {
            target: "main".to_string(),
            key: "label".to_string(),
        };
        assert_eq!(cmd_context(&store, &del).expect("ok"), 0);
        assert_eq!(cmd_context(&store, &del).expect("ok"), 1);
        assert_eq!(cmd_context(&store, &get).expect("ok"), 1);
    }

    #[test]
    fn list_always_succeeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileContextStore::new(dir.path().join("context.json"));
        let list = ContextAction::List { target: None };
        assert_eq!(cmd_context(&store, &list).expect("ok"), 0);
    }
}
