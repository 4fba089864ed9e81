//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::GroupSummaryDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of groups with at least one member
pub async fn get_groups(State(state): State<Arc<AppState>>) -> Json<Vec<GroupSummaryDto>> {
    let summaries = state.get_groups_usecase.execute().await;

    // Domain Model から DTO への変換
    let groups: Vec<GroupSummaryDto> = summaries
        .into_iter()
        .map(|(group_id, member_count)| GroupSummaryDto {
            id: group_id.as_str().to_string(),
            member_count,
        })
        .collect();

    Json(groups)
}
