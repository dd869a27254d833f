//! One-shot startup hydration: fetch the corpus, build the builtin prompt
//! set, and initialise the search service.

use tracing::info;

use super::{CorpusError, CorpusLoader, Lang};
use crate::prompt::Prompt;
use crate::search::SearchService;
use crate::store::PromptStore;

/// Fetch the corpus and initialise `service` with the builtin prompts plus
/// the store's current user prompts. Runs once per session; a service that
/// is already ready is left alone.
///
/// The language lists are merged in `[en, tw, cn]` order, reversed when the
/// active language is Simplified Chinese so that list takes priority. Every
/// fetched prompt gets a fresh id and timestamp; entries with an empty title
/// or content are dropped, though the recorded builtin count stays the raw
/// pre-filter total.
pub fn hydrate(
    loader: &dyn CorpusLoader,
    lang: Lang,
    store: &PromptStore,
    service: &mut SearchService,
) -> Result<(), CorpusError> {
    if service.is_ready() {
        return Ok(());
    }

    let document = loader.fetch()?;
    let raw_count = document.raw_len();

    let mut lists = [document.en, document.tw, document.cn];
    if lang == Lang::Cn {
        lists.reverse();
    }

    let builtin_prompts: Vec<Prompt> = lists
        .into_iter()
        .flatten()
        .map(|(title, content)| Prompt::builtin(title, content))
        .filter(|prompt| !prompt.title.is_empty() && !prompt.content.is_empty())
        .collect();

    info!(
        builtin = builtin_prompts.len(),
        raw = raw_count,
        "hydrated prompt corpus"
    );
    service.init_with_count(raw_count, builtin_prompts, store.get_user_prompts());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusDocument;

    struct StubLoader(CorpusDocument);

    impl CorpusLoader for StubLoader {
        fn fetch(&self) -> Result<CorpusDocument, CorpusError> {
            Ok(self.0.clone())
        }
    }

    fn three_language_corpus() -> CorpusDocument {
        serde_json::from_value(serde_json::json!({
            "en": [["A", "a"]],
            "tw": [["B", "b"]],
            "cn": [["C", "c"]]
        }))
        .unwrap()
    }

    #[test]
    fn english_locale_keeps_list_priority() {
        let loader = StubLoader(three_language_corpus());
        let store = PromptStore::in_memory();
        let mut service = SearchService::new();

        hydrate(&loader, Lang::En, &store, &mut service).unwrap();
        let titles: Vec<&str> = service
            .builtin_prompts()
            .iter()
            .map(|prompt| prompt.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn simplified_chinese_reverses_list_priority() {
        let loader = StubLoader(three_language_corpus());
        let store = PromptStore::in_memory();
        let mut service = SearchService::new();

        hydrate(&loader, Lang::Cn, &store, &mut service).unwrap();
        let titles: Vec<&str> = service
            .builtin_prompts()
            .iter()
            .map(|prompt| prompt.title.as_str())
            .collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
    }

    #[test]
    fn empty_entries_are_filtered_but_still_counted() {
        let loader = StubLoader(
            serde_json::from_value(serde_json::json!({
                "en": [["kept", "body"], ["", "body"], ["no body", ""]],
                "tw": [],
                "cn": []
            }))
            .unwrap(),
        );
        let store = PromptStore::in_memory();
        let mut service = SearchService::new();

        hydrate(&loader, Lang::En, &store, &mut service).unwrap();
        assert_eq!(service.builtin_prompts().len(), 1);
        assert_eq!(service.builtin_count(), 3);
    }

    #[test]
    fn fetched_prompts_get_fresh_ids() {
        let loader = StubLoader(three_language_corpus());
        let store = PromptStore::in_memory();
        let mut service = SearchService::new();

        hydrate(&loader, Lang::En, &store, &mut service).unwrap();
        let mut ids: Vec<&str> = service
            .builtin_prompts()
            .iter()
            .map(|prompt| prompt.id.as_str())
            .collect();
        assert!(ids.iter().all(|id| !id.is_empty()));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn hydration_includes_existing_user_prompts() {
        let loader = StubLoader(three_language_corpus());
        let mut store = PromptStore::in_memory();
        let mut service = SearchService::new();

        // Added before readiness: lands in the store only, picked up by init.
        let mut staging = SearchService::new();
        staging.init(Vec::new(), Vec::new());
        store.add(&mut staging, Prompt::user("mine", "body"));

        hydrate(&loader, Lang::En, &store, &mut service).unwrap();
        assert!(service.all_prompts().iter().any(|prompt| prompt.is_user));
        assert!(!service.search("mine").is_empty());
    }

    #[test]
    fn hydration_is_a_noop_once_ready() {
        let loader = StubLoader(three_language_corpus());
        let store = PromptStore::in_memory();
        let mut service = SearchService::new();
        service.init(vec![Prompt::builtin("existing", "body")], Vec::new());

        hydrate(&loader, Lang::En, &store, &mut service).unwrap();
        assert_eq!(service.builtin_prompts().len(), 1);
        assert_eq!(service.builtin_prompts()[0].title, "existing");
    }
}
