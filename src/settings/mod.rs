//! Layered configuration: default config files, environment variables with
//! a `PROMPTDECK` prefix, and CLI overrides, resolved into validated
//! settings.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::app_dirs;
use crate::chatlog::NotionTarget;
use crate::cli::CliArgs;
use crate::corpus::{DEFAULT_CORPUS_FILE, Lang};
use crate::store::STORE_FILE;

const DEFAULT_LISTEN: &str = "127.0.0.1:3220";

/// Fully resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Remote corpus source; `None` means the local corpus file only.
    pub corpus_url: Option<String>,
    /// Default (and fallback) corpus file.
    pub corpus_file: PathBuf,
    pub lang: Lang,
    pub store_path: PathBuf,
    pub listen: SocketAddr,
    /// Present only when both halves of the Notion configuration are set.
    pub notion: Option<NotionTarget>,
}

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    corpus: CorpusSection,
    notion: NotionSection,
    server: ServerSection,
    store: StoreSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CorpusSection {
    url: Option<String>,
    lang: Option<Lang>,
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct NotionSection {
    api_key: Option<String>,
    database_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ServerSection {
    listen: Option<SocketAddr>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StoreSection {
    path: Option<PathBuf>,
}

impl RawSettings {
    /// Apply CLI overrides on top of the raw configuration values.
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if cli.corpus_url.is_some() {
            self.corpus.url = cli.corpus_url.clone();
        }
        if cli.lang.is_some() {
            self.corpus.lang = cli.lang;
        }
    }

    /// Fill defaults and validate into [`Settings`].
    fn resolve(self) -> Result<Settings> {
        let data_dir = app_dirs::get_data_dir()?;

        let notion = match (self.notion.api_key, self.notion.database_id) {
            (Some(api_key), Some(database_id)) => Some(NotionTarget {
                api_key,
                database_id,
            }),
            _ => None,
        };

        let listen = match self.server.listen {
            Some(listen) => listen,
            None => DEFAULT_LISTEN
                .parse()
                .map_err(|err| anyhow!("invalid default listen address: {err}"))?,
        };

        Ok(Settings {
            corpus_url: self.corpus.url,
            corpus_file: self
                .corpus
                .file
                .unwrap_or_else(|| data_dir.join(DEFAULT_CORPUS_FILE)),
            lang: self.corpus.lang.unwrap_or_default(),
            store_path: self.store.path.unwrap_or_else(|| data_dir.join(STORE_FILE)),
            listen,
            notion,
        })
    }
}

/// Load configuration by combining CLI arguments, config files and
/// environment variables.
pub fn load(cli: &CliArgs) -> Result<Settings> {
    let builder = build_config(cli)?;
    let mut raw: RawSettings = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

/// Build a [`Config`] instance by combining default locations with CLI
/// overrides.
fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("promptdeck")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

/// Discover the default configuration file locations that should be
/// consulted.
fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".promptdeck.toml"));
        files.push(current_dir.join("promptdeck.toml"));
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_files_include_current_directory_variants() {
        let files = default_config_files();
        assert!(files.iter().any(|path| path.ends_with(".promptdeck.toml")));
        assert!(files.iter().any(|path| path.ends_with("promptdeck.toml")));
    }

    #[test]
    fn notion_target_requires_both_halves() {
        let mut raw = RawSettings::default();
        raw.notion.api_key = Some("key".into());
        let settings = raw.resolve().unwrap();
        assert!(settings.notion.is_none());

        let mut raw = RawSettings::default();
        raw.notion.api_key = Some("key".into());
        raw.notion.database_id = Some("db".into());
        let settings = raw.resolve().unwrap();
        assert!(settings.notion.is_some());
    }

    #[test]
    fn defaults_fill_paths_and_listen_address() {
        let settings = RawSettings::default().resolve().unwrap();
        assert!(settings.store_path.ends_with(STORE_FILE));
        assert!(settings.corpus_file.ends_with(DEFAULT_CORPUS_FILE));
        assert_eq!(settings.listen.port(), 3220);
        assert_eq!(settings.lang, Lang::En);
        assert!(settings.corpus_url.is_none());
    }
}
