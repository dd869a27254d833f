//! Fuzzy search over prompt collections.

mod index;
mod service;

pub use index::{PromptIndex, RankedPrompt};
pub use service::SearchService;
