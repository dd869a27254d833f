//! Wires the store, search service, and corpus hydration into one session.

use anyhow::{Context, Result, anyhow};

use crate::corpus::{self, CorpusLoader, FallbackCorpus, FileCorpus, RemoteCorpus};
use crate::prompt::Prompt;
use crate::search::SearchService;
use crate::settings::Settings;
use crate::store::PromptStore;

/// One application session: the persisted store plus a hydrated search
/// service.
pub struct PromptWorkflow {
    store: PromptStore,
    service: SearchService,
}

impl PromptWorkflow {
    /// Open the store and hydrate the search service from the configured
    /// corpus source.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let store = PromptStore::open(settings.store_path.clone());
        let mut service = SearchService::new();

        let loader = corpus_loader(settings);
        corpus::hydrate(loader.as_ref(), settings.lang, &store, &mut service)
            .context("failed to hydrate the builtin prompt corpus")?;

        Ok(Self { store, service })
    }

    /// Session without hydration, searching user prompts only. Used when
    /// the corpus is deliberately skipped.
    #[must_use]
    pub fn without_corpus(store: PromptStore) -> Self {
        let mut service = SearchService::new();
        service.init(Vec::new(), Vec::new());
        Self { store, service }
    }

    pub fn list(&self, include_builtin: bool) -> Vec<Prompt> {
        if include_builtin {
            self.store.search(&self.service, "")
        } else {
            self.store.get_user_prompts()
        }
    }

    pub fn search(&self, query: &str) -> Vec<Prompt> {
        self.store.search(&self.service, query)
    }

    pub fn add(&mut self, title: String, content: String) -> String {
        self.store.add(
            &mut self.service,
            Prompt::user(title, content),
        )
    }

    pub fn show(&self, id: &str) -> Result<Prompt> {
        self.store
            .get(&self.service, id)
            .ok_or_else(|| anyhow!("no prompt with id {id}"))
    }

    pub fn edit(&mut self, id: &str, title: Option<String>, content: Option<String>) -> Result<Prompt> {
        // Only user prompts are editable. Guarding via `show` would accept
        // builtin ids through `get`'s fallback and shell them into the user
        // map under a builtin's id.
        self.require_user(id)?;
        self.store.update_prompt(&mut self.service, id, |mut prompt| {
            if let Some(title) = title {
                prompt.title = title;
            }
            if let Some(content) = content {
                prompt.content = content;
            }
            prompt
        });
        self.show(id)
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        self.require_user(id)?;
        self.store.remove(&mut self.service, id);
        Ok(())
    }

    fn require_user(&self, id: &str) -> Result<()> {
        if self.store.contains_user(id) {
            Ok(())
        } else {
            Err(anyhow!("no user prompt with id {id}"))
        }
    }
}

/// Resolve the corpus source: a configured URL with the local file as a
/// one-shot fallback, or the local file alone.
fn corpus_loader(settings: &Settings) -> Box<dyn CorpusLoader> {
    let default = FileCorpus::new(settings.corpus_file.clone());
    match &settings.corpus_url {
        Some(url) => Box::new(FallbackCorpus::new(
            Box::new(RemoteCorpus::new(url.clone())),
            Box::new(default),
        )),
        None => Box::new(default),
    }
}
