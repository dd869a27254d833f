//! Corpus loader implementations.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use super::{CorpusDocument, CorpusError, CorpusLoader};

/// Fetches the corpus document from a configured URL.
#[derive(Debug, Clone)]
pub struct RemoteCorpus {
    url: String,
}

impl RemoteCorpus {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CorpusLoader for RemoteCorpus {
    fn fetch(&self) -> Result<CorpusDocument, CorpusError> {
        let fetch_err = |source| CorpusError::Fetch {
            url: self.url.clone(),
            source,
        };
        let response = reqwest::blocking::get(&self.url)
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(fetch_err)?;
        response.json().map_err(fetch_err)
    }
}

/// Reads the corpus document from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    path: PathBuf,
}

impl FileCorpus {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusLoader for FileCorpus {
    fn fetch(&self) -> Result<CorpusDocument, CorpusError> {
        let bytes = fs::read(&self.path).map_err(|source| CorpusError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Tries a configured primary source once, then the default source once.
///
/// Mirrors the two-attempt startup behaviour: a failed configured fetch is
/// logged and retried against the default; a second failure propagates and
/// leaves the search service uninitialised for the session.
pub struct FallbackCorpus {
    primary: Box<dyn CorpusLoader>,
    fallback: Box<dyn CorpusLoader>,
}

impl FallbackCorpus {
    #[must_use]
    pub fn new(primary: Box<dyn CorpusLoader>, fallback: Box<dyn CorpusLoader>) -> Self {
        Self { primary, fallback }
    }
}

impl CorpusLoader for FallbackCorpus {
    fn fetch(&self) -> Result<CorpusDocument, CorpusError> {
        match self.primary.fetch() {
            Ok(document) => Ok(document),
            Err(err) => {
                warn!(error = %err, "primary corpus source failed, trying default");
                self.fallback.fetch()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    struct FailingLoader;

    impl CorpusLoader for FailingLoader {
        fn fetch(&self) -> Result<CorpusDocument, CorpusError> {
            Err(CorpusError::Read {
                path: PathBuf::from("nowhere"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            })
        }
    }

    fn corpus_file(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("prompts.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn file_loader_reads_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = corpus_file(&dir, r#"{"en":[["A","a"]],"tw":[],"cn":[]}"#);

        let document = FileCorpus::new(path).fetch().unwrap();
        assert_eq!(document.en.len(), 1);
    }

    #[test]
    fn file_loader_reports_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = corpus_file(&dir, "not json");

        assert!(matches!(
            FileCorpus::new(path).fetch(),
            Err(CorpusError::Parse(_))
        ));
    }

    #[test]
    fn fallback_is_used_when_the_primary_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = corpus_file(&dir, r#"{"en":[["A","a"]],"tw":[],"cn":[]}"#);

        let loader = FallbackCorpus::new(
            Box::new(FailingLoader),
            Box::new(FileCorpus::new(path)),
        );
        assert_eq!(loader.fetch().unwrap().en.len(), 1);
    }

    #[test]
    fn fallback_failure_propagates() {
        let loader = FallbackCorpus::new(Box::new(FailingLoader), Box::new(FailingLoader));
        assert!(loader.fetch().is_err());
    }
}
