use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{error::AppResult, models::TitleRecord, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    genre: String,
    year: i32,
}

#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    name: String,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<TitleRecord>>> {
    let titles = state.catalog.search_by_title(&params.q).await?;
    Ok(Json(titles))
}

/// Handler for genre/year catalog lookup
pub async fn by_genre(
    State(state): State<AppState>,
    Query(params): Query<GenreQuery>,
) -> AppResult<Json<Vec<TitleRecord>>> {
    let titles = state
        .catalog
        .by_genre_and_year(&params.genre, params.year)
        .await?;
    Ok(Json(titles))
}

/// Handler for actor filmography lookup
pub async fn by_actor(
    State(state): State<AppState>,
    Query(params): Query<ActorQuery>,
) -> AppResult<Json<Vec<TitleRecord>>> {
    let titles = state.catalog.search_by_actor(&params.name).await?;
    Ok(Json(titles))
}

/// Handler for the random movie batch
pub async fn random_movie(State(state): State<AppState>) -> AppResult<Json<Vec<TitleRecord>>> {
    let titles = state.catalog.random_movie().await?;
    Ok(Json(titles))
}

/// Handler for the random series batch
pub async fn random_series(State(state): State<AppState>) -> AppResult<Json<Vec<TitleRecord>>> {
    let titles = state.catalog.random_series().await?;
    Ok(Json(titles))
}
