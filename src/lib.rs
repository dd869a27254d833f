//! Core crate exports for the `promptdeck` prompt store.
//!
//! The root module re-exports the store, search, and corpus types so that
//! embedders can wire a session without digging through the module
//! hierarchy.

pub mod app_dirs;
pub mod chatlog;
pub mod cli;
pub mod corpus;
pub mod models;
pub mod prompt;
pub mod search;
pub mod settings;
pub mod store;
pub mod workflow;

pub use corpus::{CorpusDocument, CorpusLoader, Lang, hydrate};
pub use prompt::Prompt;
pub use search::{PromptIndex, SearchService};
pub use settings::Settings;
pub use store::PromptStore;
pub use workflow::PromptWorkflow;
