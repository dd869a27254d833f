//! Merged search over the builtin corpus and the user collection.

use tracing::debug;

use super::index::PromptIndex;
use crate::prompt::Prompt;

/// One-way readiness state: the service starts uninitialised and becomes
/// ready exactly once, after the builtin corpus has been fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Uninitialized,
    Ready,
}

/// Search over builtin and user prompts, each held in its own fuzzy index.
///
/// Constructed once per session and passed by reference to whatever needs
/// search. Before [`init`](SearchService::init) runs, every operation is a
/// defined no-op and `search` returns nothing.
#[derive(Debug)]
pub struct SearchService {
    readiness: Readiness,
    builtin_index: PromptIndex,
    user_index: PromptIndex,
    builtin_count: usize,
    all_prompts: Vec<Prompt>,
    builtin_prompts: Vec<Prompt>,
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            readiness: Readiness::Uninitialized,
            builtin_index: PromptIndex::new(),
            user_index: PromptIndex::new(),
            builtin_count: 0,
            all_prompts: Vec::new(),
            builtin_prompts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    /// Number of builtin prompts counted at hydration time, before the
    /// empty-entry filter ran.
    #[must_use]
    pub fn builtin_count(&self) -> usize {
        self.builtin_count
    }

    /// The builtin-only list, used for id fallback lookups and for listing
    /// everything when the query is empty.
    #[must_use]
    pub fn builtin_prompts(&self) -> &[Prompt] {
        &self.builtin_prompts
    }

    /// The merged prompt list, user prompts first.
    #[must_use]
    pub fn all_prompts(&self) -> &[Prompt] {
        &self.all_prompts
    }

    /// Populate both indexes and mark the service ready. Idempotent: once
    /// ready, later calls are ignored.
    pub fn init(&mut self, builtin_prompts: Vec<Prompt>, user_prompts: Vec<Prompt>) {
        if self.is_ready() {
            return;
        }
        self.init_with_count(builtin_prompts.len(), builtin_prompts, user_prompts);
    }

    /// Like [`init`](Self::init), with an explicit builtin count recorded by
    /// the hydration loader before filtering.
    pub fn init_with_count(
        &mut self,
        builtin_count: usize,
        builtin_prompts: Vec<Prompt>,
        user_prompts: Vec<Prompt>,
    ) {
        if self.is_ready() {
            return;
        }

        self.all_prompts = user_prompts
            .iter()
            .cloned()
            .chain(builtin_prompts.iter().cloned())
            .collect();
        self.builtin_prompts = builtin_prompts.clone();
        self.builtin_count = builtin_count;
        self.builtin_index.set_collection(builtin_prompts);
        self.user_index.set_collection(user_prompts);
        self.readiness = Readiness::Ready;
        debug!(
            builtin = self.builtin_index.len(),
            user = self.user_index.len(),
            "search service ready"
        );
    }

    /// Remove a record from the user index by id. The builtin index and the
    /// prompt store are untouched; store deletion is a separate call.
    pub fn remove(&mut self, id: &str) {
        if !self.is_ready() {
            return;
        }
        self.user_index.remove(id);
    }

    /// Insert a record into the user index.
    pub fn add(&mut self, prompt: Prompt) {
        if !self.is_ready() {
            return;
        }
        self.user_index.add(prompt);
    }

    /// Query both indexes independently and concatenate user matches before
    /// builtin matches. The two result sets are not deduplicated.
    #[must_use]
    pub fn search(&self, text: &str) -> Vec<Prompt> {
        if !self.is_ready() {
            return Vec::new();
        }

        let user_results = self.user_index.search(text);
        let builtin_results = self.builtin_index.search(text);
        user_results
            .into_iter()
            .chain(builtin_results)
            .map(|ranked| ranked.prompt)
            .collect()
    }
}
