use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::MatchOutcome, models::TitleRecord,
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    user_a: String,
    user_b: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    session_id: Uuid,
    user_a: String,
    user_b: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitGenresRequest {
    user_id: String,
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    user_id: String,
    title_id: i64,
    liked: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    title_ids: Vec<i64>,
}

/// Handler for session creation
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> AppResult<(StatusCode, Json<CreateSessionResponse>)> {
    let session = state
        .sessions
        .create_session(request.user_a, request.user_b)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.session_id,
            user_a: session.user_a,
            user_b: session.user_b,
        }),
    ))
}

/// Handler for genre submission; the new set replaces any previous one
pub async fn submit_genres(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SubmitGenresRequest>,
) -> AppResult<StatusCode> {
    state
        .sessions
        .set_genres(
            session_id,
            &request.user_id,
            request.genres.into_iter().collect(),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for the candidate cursor
pub async fn next_candidate(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<TitleRecord>> {
    tracing::info!(
        request_id = %request_id,
        session_id = %session_id,
        "Selecting next candidate"
    );

    let candidate = state.sessions.next_candidate(session_id).await?;
    Ok(Json(candidate))
}

/// Handler for vote casting; reports whether the pair has matched
pub async fn vote(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<VoteRequest>,
) -> AppResult<Json<MatchOutcome>> {
    let outcome = state
        .sessions
        .cast_vote(session_id, &request.user_id, request.title_id, request.liked)
        .await?;

    Ok(Json(outcome))
}

/// Handler for the matched-titles query
pub async fn matches(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<MatchesResponse>> {
    let title_ids = state.sessions.matches(session_id).await?;
    Ok(Json(MatchesResponse { title_ids }))
}
