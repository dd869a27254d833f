//! The persisted collection of user-authored prompts.
//!
//! The store is the sole writer of the user prompt mapping. The
//! [`SearchService`] holds a derived copy of the same records, so every
//! mutating operation takes the service and keeps its user index in step.

use std::cmp::Reverse;
use std::path::PathBuf;

use tracing::warn;

use crate::prompt::Prompt;
use crate::search::SearchService;

mod persistence;
mod state;

pub use persistence::{STORE_FILE, load_state, save_state};
pub use state::{SCHEMA_VERSION, StoreState};

/// Persisted, versioned key-value store over user prompts.
#[derive(Debug, Default)]
pub struct PromptStore {
    state: StoreState,
    path: Option<PathBuf>,
}

impl PromptStore {
    /// Open the store backed by `path`, healing older schema versions on
    /// load. A store that fails to load starts empty rather than aborting
    /// the session; the failure is logged.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let state = match persistence::load_state(&path) {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "starting with an empty prompt store");
                StoreState::default()
            }
        };
        Self {
            state,
            path: Some(path),
        }
    }

    /// A store with no backing file. Used in tests and by callers that
    /// manage persistence themselves.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Deletion counter; bumped on every removal.
    #[must_use]
    pub fn counter(&self) -> u64 {
        self.state.counter
    }

    /// Insert a prompt, overriding its identity fields: a fresh id,
    /// `is_user` forced true, and the current timestamp. The user search
    /// index is updated in the same call, so the prompt is immediately
    /// searchable. Returns the new id.
    pub fn add(&mut self, service: &mut SearchService, mut prompt: Prompt) -> String {
        prompt.id = crate::prompt::fresh_id();
        prompt.is_user = true;
        prompt.created_at = crate::prompt::now_millis();

        let id = prompt.id.clone();
        self.state.prompts.insert(id.clone(), prompt.clone());
        self.persist();
        service.add(prompt);
        id
    }

    /// Whether `id` names an entry in the user mapping. Unlike
    /// [`get`](Self::get) this never consults the builtin list, so callers
    /// can distinguish "editable user prompt" from "read-only builtin".
    /// Mirrors the defensive scan in [`remove`](Self::remove) for data where
    /// keys and ids diverged.
    #[must_use]
    pub fn contains_user(&self, id: &str) -> bool {
        self.state.prompts.contains_key(id)
            || self.state.prompts.values().any(|prompt| prompt.id == id)
    }

    /// Look up a prompt by id, falling back to the builtin list when the
    /// user mapping has no entry.
    #[must_use]
    pub fn get(&self, service: &SearchService, id: &str) -> Option<Prompt> {
        if let Some(prompt) = self.state.prompts.get(id) {
            return Some(prompt.clone());
        }
        service
            .builtin_prompts()
            .iter()
            .find(|prompt| prompt.id == id)
            .cloned()
    }

    /// Remove a prompt by id and drop it from the user search index.
    ///
    /// Removal happens twice: by key, then by scanning entries for a
    /// matching `id` field. Keys equal ids by construction after the v3
    /// migration, so the scan normally finds nothing; it guards data where
    /// the two diverged.
    pub fn remove(&mut self, service: &mut SearchService, id: &str) {
        self.state.prompts.remove(id);

        let stray_key = self
            .state
            .prompts
            .iter()
            .find(|(_, prompt)| prompt.id == id)
            .map(|(key, _)| key.clone());
        if let Some(key) = stray_key {
            self.state.prompts.remove(&key);
        }

        service.remove(id);
        self.state.counter += 1;
        self.persist();
    }

    /// All user prompts, newest first. Entries without an id sort after the
    /// identified ones; the key is a total order, so hand-loaded state with
    /// missing ids cannot trip the sort.
    #[must_use]
    pub fn get_user_prompts(&self) -> Vec<Prompt> {
        let mut prompts: Vec<Prompt> = self.state.prompts.values().cloned().collect();
        prompts.sort_by_key(|prompt| (prompt.id.is_empty(), Reverse(prompt.created_at)));
        prompts
    }

    /// Apply a pure transform to the prompt stored under `id`, creating a
    /// blank shell when no entry exists.
    ///
    /// The index removes by identity only, so the stale record must leave
    /// the index before any field changes; the updated record is re-added
    /// afterwards.
    pub fn update_prompt<F>(&mut self, service: &mut SearchService, id: &str, transform: F)
    where
        F: FnOnce(Prompt) -> Prompt,
    {
        let existing = self
            .state
            .prompts
            .get(id)
            .cloned()
            .unwrap_or_else(|| Prompt::shell(id));

        service.remove(id);
        let updated = transform(existing);
        self.state.prompts.insert(id.to_string(), updated.clone());
        self.persist();
        service.add(updated);
    }

    /// Empty queries list everything: user prompts newest first, then the
    /// builtin corpus. Anything else delegates to the fuzzy search.
    #[must_use]
    pub fn search(&self, service: &SearchService, text: &str) -> Vec<Prompt> {
        if text.is_empty() {
            let mut results = self.get_user_prompts();
            results.extend(service.builtin_prompts().iter().cloned());
            return results;
        }
        service.search(text)
    }

    // Writes are fire-and-forget: a failed write loses at most the last
    // mutation and must not take the session down with it.
    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = persistence::save_state(path, &self.state) {
            warn!(error = %err, "failed to persist prompt store");
        }
    }
}
