use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::MovieId;
use crate::services::catalog;

use super::responses::{MovieCard, MovieDetailsCard, RecommendationsResponse};
use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Comma-separated TMDB movie ids
    #[serde(default)]
    pub movie_ids: String,
}

/// Parses a comma-separated id list, skipping blank segments
///
/// Returns `None` if any segment is not an integer.
pub fn parse_movie_ids(raw: &str) -> Option<Vec<MovieId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.parse::<MovieId>().ok())
        .collect()
}

// Handlers

/// Root banner
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Movie Recommendation API is running" }))
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Search movies by title
pub async fn search_movies(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<MovieCard>> {
    tracing::info!(request_id = %request_id, query = %params.query, "Processing movie search");

    let movies = catalog::search_movies(state.provider.as_ref(), &params.query).await;
    Json(MovieCard::from_list(&movies, &state.images))
}

/// This week's trending movies
pub async fn weekly_trends(State(state): State<AppState>) -> Json<Vec<MovieCard>> {
    let movies = catalog::weekly_trends(state.provider.as_ref()).await;
    Json(MovieCard::from_list(&movies, &state.images))
}

/// Full details for a single movie, with director and top cast
pub async fn movie_details(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    movie_id: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Json<MovieDetailsCard>> {
    let Path(movie_id) =
        movie_id.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    tracing::info!(request_id = %request_id, movie_id, "Fetching movie details");

    let full = catalog::full_details(state.provider.as_ref(), movie_id)
        .await
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(Json(MovieDetailsCard::new(&full, &state.images)))
}

/// Sequel groups and ranked recommendations for the selected movies
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> Json<RecommendationsResponse> {
    let Some(movie_ids) = parse_movie_ids(&params.movie_ids) else {
        tracing::warn!(
            request_id = %request_id,
            movie_ids = %params.movie_ids,
            "Malformed movie_ids, returning empty recommendations"
        );
        return Json(RecommendationsResponse::default());
    };

    tracing::info!(
        request_id = %request_id,
        movie_count = movie_ids.len(),
        "Processing recommendation request"
    );

    let result = state.aggregator.aggregate(&movie_ids).await;

    tracing::info!(
        request_id = %request_id,
        sequels = result.sequels.len(),
        recommendations = result.recommendations.len(),
        "Recommendations completed"
    );

    Json(RecommendationsResponse::new(&result, &state.images))
}
