//! The builtin prompt corpus: document shape, pluggable loaders, and the
//! startup hydration that feeds the search service.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

mod hydration;
mod loader;

pub use hydration::hydrate;
pub use loader::{FallbackCorpus, FileCorpus, RemoteCorpus};

/// File name of the default corpus under the application data directory.
pub const DEFAULT_CORPUS_FILE: &str = "prompts.json";

/// A `[title, content]` pair as shipped in the corpus document.
pub type PromptPair = (String, String);

/// The fetched corpus: one ordered prompt list per language.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorpusDocument {
    pub en: Vec<PromptPair>,
    pub tw: Vec<PromptPair>,
    pub cn: Vec<PromptPair>,
}

impl CorpusDocument {
    /// Total number of entries across all languages, before any filtering.
    #[must_use]
    pub fn raw_len(&self) -> usize {
        self.en.len() + self.tw.len() + self.cn.len()
    }
}

/// Active display language; decides the priority order of the corpus lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Tw,
    Cn,
}

/// Failures while obtaining the corpus document.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to fetch prompt corpus from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read prompt corpus at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("prompt corpus is not valid JSON")]
    Parse(#[from] serde_json::Error),
}

/// Source of the builtin corpus. Implementations exist for HTTP, local
/// files, and a primary-with-fallback composition of the two.
pub trait CorpusLoader {
    fn fetch(&self) -> Result<CorpusDocument, CorpusError>;
}
