//! Persisted shape of the prompt store and its schema migration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::prompt::{Prompt, fresh_id};

/// Current persisted schema version. States written before version 3 carry
/// ids from a buggy generation scheme and are healed on load.
pub const SCHEMA_VERSION: u32 = 3;

/// In-memory store state: a deletion counter plus the user prompt mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreState {
    /// Bumped on every deletion so downstream observers recompute.
    pub counter: u64,
    /// User-authored prompts keyed by id. Insertion order is irrelevant.
    pub prompts: HashMap<String, Prompt>,
}

/// On-disk envelope: the state plus a version tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PersistedState {
    pub version: u32,
    #[serde(default)]
    pub counter: u64,
    #[serde(default)]
    pub prompts: HashMap<String, Prompt>,
}

impl PersistedState {
    pub(crate) fn from_state(state: &StoreState) -> Self {
        Self {
            version: SCHEMA_VERSION,
            counter: state.counter,
            prompts: state.prompts.clone(),
        }
    }

    /// Upgrade to the current schema. Versions below 3 regenerate every
    /// prompt id and re-key the map so keys equal ids again; at the current
    /// version this is the identity.
    pub(crate) fn migrate(mut self) -> StoreState {
        if self.version < SCHEMA_VERSION {
            self.prompts = self
                .prompts
                .into_values()
                .map(|mut prompt| {
                    prompt.id = fresh_id();
                    (prompt.id.clone(), prompt)
                })
                .collect();
        }

        StoreState {
            counter: self.counter,
            prompts: self.prompts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_state() -> PersistedState {
        let mut prompts = HashMap::new();
        for key in ["a", "b", "c"] {
            let mut prompt = Prompt::user(format!("title {key}"), "content");
            // Pre-v3 data had missing or colliding ids.
            prompt.id = String::new();
            prompts.insert(key.to_string(), prompt);
        }
        PersistedState {
            version: 2,
            counter: 4,
            prompts,
        }
    }

    #[test]
    fn migration_regenerates_distinct_ids_and_rekeys() {
        let state = legacy_state().migrate();
        assert_eq!(state.prompts.len(), 3);
        assert_eq!(state.counter, 4);
        for (key, prompt) in &state.prompts {
            assert!(!prompt.id.is_empty());
            assert_eq!(key, &prompt.id);
        }
        let mut ids: Vec<&str> = state.prompts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn migration_is_idempotent_at_current_version() {
        let migrated = legacy_state().migrate();
        let roundtripped = PersistedState::from_state(&migrated).migrate();
        assert_eq!(
            serde_json::to_value(&migrated.prompts).unwrap(),
            serde_json::to_value(&roundtripped.prompts).unwrap()
        );
    }
}
