//! The chat log HTTP boundary: one POST endpoint that mirrors exchanges
//! into an external Notion database.

use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::{error, info};

mod blocks;
mod notion;

pub use blocks::{BLOCK_CHAR_LIMIT, split_text_into_blocks};
pub use notion::{ChatLogEntry, NotionClient, NotionTarget, build_page_request};

/// Shared handler state. A missing target means logging is disabled and the
/// endpoint silently succeeds.
#[derive(Debug, Clone, Default)]
pub struct ChatLogState {
    pub notion: Option<NotionTarget>,
}

/// Build the router exposing `POST /api/chatlog`.
#[must_use]
pub fn router(state: ChatLogState) -> Router {
    Router::new()
        .route("/api/chatlog", post(log_chat))
        .with_state(state)
}

/// Bind and serve the chat log endpoint until the process exits.
pub async fn serve(addr: SocketAddr, state: ChatLogState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "chat log endpoint listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn log_chat(
    State(state): State<ChatLogState>,
    Json(entry): Json<ChatLogEntry>,
) -> (StatusCode, Json<Value>) {
    info!(
        session_id = %entry.session_id,
        user_name = %entry.user_name,
        "chat log request"
    );

    // Unconfigured logging is a deliberate silent skip, not an error.
    let Some(target) = &state.notion else {
        info!("notion configuration not found, skipping chat log");
        return (StatusCode::OK, Json(json!({ "success": true })));
    };

    let payload = build_page_request(&target.database_id, &entry);
    match NotionClient::new(&target.api_key).create_page(&payload).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(err) => {
            error!(error = %err, "failed to log chat");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to log chat" })),
            )
        }
    }
}
