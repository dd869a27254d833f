//! JSON-on-disk persistence for the prompt store.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::state::{PersistedState, StoreState};

/// File name of the store under the application data directory.
pub const STORE_FILE: &str = "prompt-store.json";

/// Load and migrate persisted state. A missing file yields the default
/// (empty) state; a malformed file is an error the caller decides about.
pub fn load_state(path: &Path) -> Result<StoreState> {
    if !path.exists() {
        return Ok(StoreState::default());
    }

    let bytes = fs::read(path)
        .with_context(|| format!("failed to read prompt store at {}", path.display()))?;
    let persisted: PersistedState = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse prompt store at {}", path.display()))?;
    Ok(persisted.migrate())
}

/// Write the state with the current schema version tag.
pub fn save_state(path: &Path, state: &StoreState) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let persisted = PersistedState::from_state(state);
    let bytes = serde_json::to_vec_pretty(&persisted).context("failed to serialize prompt store")?;
    fs::write(path, bytes)
        .with_context(|| format!("failed to write prompt store at {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Prompt;

    #[test]
    fn missing_file_loads_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_state(&dir.path().join(STORE_FILE)).unwrap();
        assert_eq!(state.counter, 0);
        assert!(state.prompts.is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE);

        let mut state = StoreState::default();
        let prompt = Prompt::user("Greeting", "Hello");
        state.prompts.insert(prompt.id.clone(), prompt.clone());
        state.counter = 2;
        save_state(&path, &state).unwrap();

        let loaded = load_state(&path).unwrap();
        assert_eq!(loaded.counter, 2);
        assert_eq!(loaded.prompts.get(&prompt.id), Some(&prompt));
    }

    #[test]
    fn legacy_versions_are_migrated_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE);
        std::fs::write(
            &path,
            serde_json::json!({
                "version": 2,
                "counter": 1,
                "prompts": {
                    "old-key": {
                        "id": "",
                        "isUser": true,
                        "title": "kept",
                        "content": "body",
                        "createdAt": 10
                    }
                }
            })
            .to_string(),
        )
        .unwrap();

        let loaded = load_state(&path).unwrap();
        let (key, prompt) = loaded.prompts.iter().next().unwrap();
        assert_ne!(key, "old-key");
        assert_eq!(key, &prompt.id);
        assert_eq!(prompt.title, "kept");
    }
}
