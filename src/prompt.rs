//! The prompt record shared by the store, the search indexes, and the
//! fetched builtin corpus.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One reusable text template.
///
/// Ids are opaque unique strings assigned at creation and never reused. The
/// builtin corpus and the user collection share this type; only `is_user`
/// distinguishes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    #[serde(default)]
    pub is_user: bool,
    pub title: String,
    pub content: String,
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub created_at: u64,
}

impl Prompt {
    /// Build a user-authored prompt with a fresh id and the current time.
    #[must_use]
    pub fn user(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            is_user: true,
            title: title.into(),
            content: content.into(),
            created_at: now_millis(),
        }
    }

    /// Build a builtin prompt with a fresh id and the current time.
    #[must_use]
    pub fn builtin(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            is_user: false,
            title: title.into(),
            content: content.into(),
            created_at: now_millis(),
        }
    }

    /// An empty shell keyed by an existing id, used when an update targets a
    /// prompt that does not exist yet.
    #[must_use]
    pub fn shell(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_user: true,
            title: String::new(),
            content: String::new(),
            created_at: now_millis(),
        }
    }
}

/// Generate a fresh opaque prompt id.
#[must_use]
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time in epoch milliseconds.
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompts_are_flagged_and_stamped() {
        let prompt = Prompt::user("Greeting", "Hello");
        assert!(prompt.is_user);
        assert!(!prompt.id.is_empty());
        assert!(prompt.created_at > 0);
    }

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(fresh_id(), fresh_id());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let prompt = Prompt::user("t", "c");
        let json = serde_json::to_value(&prompt).unwrap();
        assert!(json.get("isUser").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
