//! Frizbee-backed fuzzy index over one prompt collection.

use frizbee::{Config, match_list};

use crate::prompt::Prompt;

/// Threshold above which frizbee's prefilter pays for itself.
const PREFILTER_ENABLE_THRESHOLD: usize = 1_000;

/// A match returned by [`PromptIndex::search`], ranked by score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPrompt {
    pub score: u16,
    pub prompt: Prompt,
}

/// Builds fuzzy matching options for the provided query and dataset size.
fn config_for_query(query: &str, dataset_len: usize) -> Config {
    let mut config = Config {
        prefilter: false,
        ..Config::default()
    };

    let length = query.chars().count();
    let mut allowed_typos: u16 = match length {
        0 => 0,
        1 => 0,
        2..=4 => 1,
        5..=7 => 2,
        8..=12 => 3,
        _ => 4,
    };
    if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
        allowed_typos = allowed_typos.min(max_reasonable);
    }

    if dataset_len >= PREFILTER_ENABLE_THRESHOLD {
        config.prefilter = true;
        config.max_typos = Some(allowed_typos);
    } else {
        config.prefilter = false;
        config.max_typos = None;
    }

    config.sort = false;

    config
}

/// Holds one mutable prompt collection and answers approximate title queries.
///
/// The index has no persistence of its own; it is rebuilt from the store and
/// the fetched corpus whenever the application starts.
#[derive(Debug, Default)]
pub struct PromptIndex {
    prompts: Vec<Prompt>,
}

impl PromptIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection.
    pub fn set_collection(&mut self, prompts: Vec<Prompt>) {
        self.prompts = prompts;
    }

    /// Insert one record.
    pub fn add(&mut self, prompt: Prompt) {
        self.prompts.push(prompt);
    }

    /// Remove every record whose `id` matches. Identity-based removal is the
    /// only way to update a record: callers remove, mutate, then re-add.
    pub fn remove(&mut self, id: &str) {
        self.prompts.retain(|prompt| prompt.id != id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Rank the collection against `query` by title, best score first.
    ///
    /// Zero-score entries are dropped. An empty or whitespace-only query
    /// matches nothing; listing everything is the caller's concern.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<RankedPrompt> {
        let trimmed = query.trim();
        if trimmed.is_empty() || self.prompts.is_empty() {
            return Vec::new();
        }

        let haystacks: Vec<&str> = self
            .prompts
            .iter()
            .map(|prompt| prompt.title.as_str())
            .collect();
        let config = config_for_query(trimmed, haystacks.len());

        let mut ranked: Vec<(usize, u16)> = match_list(trimmed, &haystacks, &config)
            .into_iter()
            .filter(|entry| entry.score > 0)
            .map(|entry| (entry.index as usize, entry.score))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .map(|(index, score)| RankedPrompt {
                score,
                prompt: self.prompts[index].clone(),
            })
            .collect()
    }
}
