//! Notion page construction and the thin API client behind the chat log
//! endpoint.

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use super::blocks::split_text_into_blocks;

const NOTION_PAGES_URL: &str = "https://api.notion.com/v1/pages";
const NOTION_VERSION: &str = "2022-06-28";

/// Character cap for the indexed rich-text columns.
const INDEX_FIELD_LIMIT: usize = 100;

/// Notion rejects pages with more than 100 children.
const MAX_CHILDREN: usize = 100;

/// Fixed page title; the external database keys off its other columns.
const PAGE_TITLE: &str = "HAI";

/// One chat exchange to be logged.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLogEntry {
    pub session_id: String,
    pub user_message: String,
    pub bot_message: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub user_name: String,
}

/// Resolved Notion target: both halves of the configuration are present.
#[derive(Debug, Clone)]
pub struct NotionTarget {
    pub api_key: String,
    pub database_id: String,
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn rich_text(content: &str) -> Value {
    json!([{ "text": { "content": content } }])
}

fn heading(content: &str) -> Value {
    json!({
        "type": "heading_1",
        "heading_1": { "rich_text": rich_text(content) },
    })
}

fn paragraph(content: &str) -> Value {
    json!({
        "type": "paragraph",
        "paragraph": { "rich_text": rich_text(content) },
    })
}

fn timestamp_rfc3339(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Utc::now)
        .to_rfc3339()
}

/// Build the page-create request body for one log entry.
///
/// Indexed columns carry the messages truncated to 100 characters; the full
/// messages follow as heading+paragraph children, capped at 100 blocks. The
/// column names belong to the external database schema and are not ours to
/// rename.
#[must_use]
pub fn build_page_request(database_id: &str, entry: &ChatLogEntry) -> Value {
    let mut children = vec![heading("用户消息")];
    children.extend(
        split_text_into_blocks(&entry.user_message)
            .iter()
            .map(|text| paragraph(text)),
    );
    children.push(heading("机器人回复"));
    children.extend(
        split_text_into_blocks(&entry.bot_message)
            .iter()
            .map(|text| paragraph(text)),
    );
    children.truncate(MAX_CHILDREN);

    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "Name": { "title": rich_text(PAGE_TITLE) },
            "用户消息": {
                "rich_text": rich_text(&truncate_chars(&entry.user_message, INDEX_FIELD_LIMIT)),
            },
            "机器人回复": {
                "rich_text": rich_text(&truncate_chars(&entry.bot_message, INDEX_FIELD_LIMIT)),
            },
            "时间": { "date": { "start": timestamp_rfc3339(entry.timestamp) } },
            "SessionId": { "rich_text": rich_text(&entry.session_id) },
            "用户名": { "rich_text": rich_text(&entry.user_name) },
        },
        "children": children,
    })
}

/// Minimal Notion API client: create one page per logged exchange.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    api_key: String,
}

impl NotionClient {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    pub async fn create_page(&self, payload: &Value) -> Result<()> {
        self.http
            .post(NOTION_PAGES_URL)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(payload)
            .send()
            .await
            .context("failed to reach the Notion API")?
            .error_for_status()
            .context("Notion rejected the page create request")?;
        Ok(())
    }
}
