//! Axum route handlers for chapters and the stored API key.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::manuscript::models::Chapter;
use crate::manuscript::store::{ChapterUpdate, NewChapter};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterListResponse {
    pub chapters: Vec<Chapter>,
    pub total_word_count: u64,
    pub average_chapter_length: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyStatus {
    pub configured: bool,
}

/// GET /api/v1/chapters
pub async fn handle_list_chapters(
    State(state): State<AppState>,
) -> Result<Json<ChapterListResponse>, AppError> {
    let chapters = state.store.chapters()?;
    let total_word_count: u64 = chapters.iter().map(|c| c.word_count).sum();
    let average_chapter_length = match chapters.len() as u64 {
        0 => 0,
        n => (total_word_count + n / 2) / n,
    };
    Ok(Json(ChapterListResponse {
        chapters,
        total_word_count,
        average_chapter_length,
    }))
}

/// POST /api/v1/chapters
pub async fn handle_create_chapter(
    State(state): State<AppState>,
    Json(request): Json<NewChapter>,
) -> Result<(StatusCode, Json<Chapter>), AppError> {
    let chapter = state.store.add_chapter(request)?;
    Ok((StatusCode::CREATED, Json(chapter)))
}

/// PUT /api/v1/chapters/:id
pub async fn handle_update_chapter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ChapterUpdate>,
) -> Result<Json<Chapter>, AppError> {
    Ok(Json(state.store.update_chapter(id, request)?))
}

/// DELETE /api/v1/chapters/:id
pub async fn handle_delete_chapter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_chapter(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/settings/api-key
///
/// Never echoes the key itself.
pub async fn handle_api_key_status(State(state): State<AppState>) -> Json<ApiKeyStatus> {
    Json(ApiKeyStatus {
        configured: state.llm.has_api_key().await,
    })
}

/// PUT /api/v1/settings/api-key
///
/// Saves the key to the local store and installs it on the model client.
pub async fn handle_set_api_key(
    State(state): State<AppState>,
    Json(request): Json<ApiKeyRequest>,
) -> Result<Json<ApiKeyStatus>, AppError> {
    let api_key = request.api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::Validation("apiKey cannot be empty".to_string()));
    }

    state.store.set_api_key(api_key)?;
    state.llm.set_api_key(api_key.to_string()).await;
    tracing::info!("Gemini API key updated");

    Ok(Json(ApiKeyStatus {
        configured: state.llm.has_api_key().await,
    }))
}
