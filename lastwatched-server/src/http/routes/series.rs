//! Series endpoints: list, detail, create, update, delete.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use lastwatched_core::model::{SeriesDetail, SeriesItem};

use crate::http::error::ApiError;
use crate::http::server::AppState;

const DEFAULT_LIMIT: i64 = 50;
const DEFAULT_SKIP: i64 = 0;

/// Listing query parameters.
///
/// Numbers are carried as raw strings so that absent or unparseable values
/// fall back to their defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search_string: Option<String>,
    pub skip: Option<String>,
    pub limit: Option<String>,
}

fn int_or_default(value: Option<&str>, default: i64) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Series creation payload.
///
/// Counts are unsigned; negative values never reach the store.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoviePayload {
    pub movie_name: String,
    pub url: String,
    pub series_number: u32,
    pub episodes_in_series: u32,
}

/// Series update payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMoviePayload {
    pub movie_name: String,
    pub url: String,
}

/// GET /movies - list series matching the search string.
async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SeriesItem>>, ApiError> {
    let search = query.search_string.unwrap_or_default();
    let limit = int_or_default(query.limit.as_deref(), DEFAULT_LIMIT);
    let skip = int_or_default(query.skip.as_deref(), DEFAULT_SKIP);

    let items = state.store.list(&search, limit, skip).await?;
    Ok(Json(items))
}

/// GET /movie/{id} - aggregated series detail.
async fn movie_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SeriesDetail>, ApiError> {
    let detail = state.store.detail(id).await?;
    Ok(Json(detail))
}

/// POST /movie - create a series with its season/episode grid.
async fn create_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateMoviePayload>, JsonRejection>,
) -> Result<Json<SeriesDetail>, ApiError> {
    let Json(payload) = payload.map_err(|err| ApiError::Validation(err.body_text()))?;

    let detail = state
        .store
        .create(
            &payload.movie_name,
            &payload.url,
            payload.series_number,
            payload.episodes_in_series,
        )
        .await?;
    Ok(Json(detail))
}

/// PUT /movie/{id} - update name and url.
async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateMoviePayload>, JsonRejection>,
) -> Result<Json<SeriesDetail>, ApiError> {
    let Json(payload) = payload.map_err(|err| ApiError::Validation(err.body_text()))?;

    let detail = state
        .store
        .update(id, &payload.movie_name, &payload.url)
        .await?;
    Ok(Json(detail))
}

/// DELETE /movie/{id} - delete a series and, via cascade, its grid.
async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    // The delete statement itself does not report missing rows; the
    // existence check supplies the 404.
    state.store.detail(id).await?;
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Series routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movie", post(create_movie))
        .route(
            "/movie/{id}",
            get(movie_detail).put(update_movie).delete(delete_movie),
        )
}
