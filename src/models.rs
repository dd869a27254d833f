//! Allow-list filtering of the configured model list.

use serde::{Deserialize, Serialize};

/// Model names permitted by the deployment.
pub const ALLOWED_MODELS: &[&str] = &[
    "deepseek-chat",
    "deepseek-coder",
    "deepseek-reasoner",
    "Pro/deepseek-ai/DeepSeek-R1",
    "Pro/deepseek-ai/DeepSeek-V3",
    "qwq-32b",
    "qwen-plus",
    "deepseek-r1",
];

/// One configured model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    #[serde(default)]
    pub provider: String,
}

/// Keep only the models whose names appear in `allowed`, preserving the
/// input order.
#[must_use]
pub fn filter_models(models: &[ModelEntry], allowed: &[&str]) -> Vec<ModelEntry> {
    models
        .iter()
        .filter(|model| allowed.contains(&model.name.as_str()))
        .cloned()
        .collect()
}

/// Memoizes [`filter_models`] on its inputs: recomputation happens only
/// when the model list or the allow-list changes.
#[derive(Debug, Default)]
pub struct ModelFilter {
    memo: Option<Memo>,
    recomputes: usize,
}

#[derive(Debug)]
struct Memo {
    models: Vec<ModelEntry>,
    allowed: Vec<String>,
    result: Vec<ModelEntry>,
}

impl ModelFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filtered view of `models`, served from the memo when the inputs
    /// match the previous call.
    pub fn filtered(&mut self, models: &[ModelEntry], allowed: &[&str]) -> Vec<ModelEntry> {
        let inputs_match = self.memo.as_ref().is_some_and(|memo| {
            memo.models == models && memo.allowed.iter().map(String::as_str).eq(allowed.iter().copied())
        });

        if !inputs_match {
            self.recomputes += 1;
            self.memo = Some(Memo {
                models: models.to_vec(),
                allowed: allowed.iter().map(ToString::to_string).collect(),
                result: filter_models(models, allowed),
            });
        }

        self.memo
            .as_ref()
            .map(|memo| memo.result.clone())
            .unwrap_or_default()
    }

    /// Number of times the filter actually ran.
    #[must_use]
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }
}
