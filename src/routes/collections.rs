use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{error::AppResult, services::collection, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTitleRequest {
    title_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    user_id: String,
    title_ids: Vec<i64>,
}

/// Handler for adding a title to a user's collection
pub async fn add_title(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<AddTitleRequest>,
) -> AppResult<StatusCode> {
    collection::add_to_collection(&state.collections, &user_id, request.title_id).await?;
    Ok(StatusCode::CREATED)
}

/// Handler for listing a user's collection
pub async fn get_collection(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<CollectionResponse>> {
    let title_ids = collection::get_collection(&state.collections, &user_id).await?;
    Ok(Json(CollectionResponse { user_id, title_ids }))
}
