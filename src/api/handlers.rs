use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{CatalogEntry, MovieId, Recommendation},
};

use super::AppState;

const DEFAULT_IMAGE: &str = "https://images.unsplash.com/photo-1440404653325-ab127d49abc1";
const DEFAULT_DURATION: &str = "2h";
const DEFAULT_GENRES: [&str; 2] = ["Action", "Drama"];
const DEFAULT_DIRECTOR: &str = "Various";
const DEFAULT_YEAR: &str = "2023";
const DEFAULT_RATING: &str = "8.0";

const MIN_RATING: f64 = 0.0;
const MAX_RATING: f64 = 5.0;

// Request/Response types

/// Catalog entry as exposed to clients, with display defaults filled in
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: MovieId,
    pub title: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<&CatalogEntry> for MovieResponse {
    fn from(entry: &CatalogEntry) -> Self {
        let mut fields: Map<String, Value> = entry
            .metadata
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "id" | "title"))
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();

        let defaults = [
            ("image", json!(DEFAULT_IMAGE)),
            ("duration", json!(DEFAULT_DURATION)),
            ("genre", json!(DEFAULT_GENRES)),
            ("director", json!(DEFAULT_DIRECTOR)),
            ("year", json!(DEFAULT_YEAR)),
            ("rating", json!(DEFAULT_RATING)),
            (
                "description",
                json!(format!("Watch {} - A great movie!", entry.name)),
            ),
        ];
        for (key, value) in defaults {
            fields.entry(key).or_insert(value);
        }

        Self {
            id: entry.id,
            title: entry.name.clone(),
            fields,
        }
    }
}

/// Body of `POST /recommend`
///
/// `rating` accepts a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub movie_name: Option<String>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub n_recommendations: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub input_movie: String,
    pub input_rating: f64,
    pub recommendations: Vec<Recommendation>,
}

/// Validated form of a [`RecommendRequest`]
#[derive(Debug, PartialEq)]
struct RecommendQuery {
    movie_name: String,
    rating: f64,
    top_n: i64,
}

impl RecommendRequest {
    fn validate(self, default_top_n: i64) -> AppResult<RecommendQuery> {
        let (movie_name, rating) = match (self.movie_name, self.rating) {
            (Some(name), Some(rating)) if !name.is_empty() && !rating.is_null() => (name, rating),
            _ => {
                return Err(AppError::InvalidInput(
                    "Missing `movie_name` or `rating`".to_string(),
                ))
            }
        };

        let rating = parse_rating(&rating)
            .ok_or_else(|| AppError::InvalidInput("Rating must be a number".to_string()))?;

        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::InvalidInput(
                "Rating must be between 0 and 5".to_string(),
            ));
        }

        Ok(RecommendQuery {
            movie_name,
            rating,
            top_n: self.n_recommendations.unwrap_or(default_top_n),
        })
    }
}

fn parse_rating(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Lists the full catalog
pub async fn get_movies(State(state): State<AppState>) -> Json<Vec<MovieResponse>> {
    let movies = state
        .engine
        .catalog()
        .entries()
        .iter()
        .map(MovieResponse::from)
        .collect();
    Json(movies)
}

/// Recommends movies from a single seed movie and rating
pub async fn recommend(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let Json(request) = payload?;
    let query = request.validate(state.default_recommendations)?;

    tracing::info!(
        request_id = %request_id,
        movie_name = %query.movie_name,
        rating = query.rating,
        top_n = query.top_n,
        "Processing recommendation request"
    );

    let engine = state.engine.clone();
    let RecommendQuery {
        movie_name,
        rating,
        top_n,
    } = query;

    // Scoring is CPU-bound; keep it off the async workers.
    let (movie_name, result) = tokio::task::spawn_blocking(move || {
        let result = engine.recommend(&movie_name, rating, top_n);
        (movie_name, result)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let recommendations = result.map_err(|e| {
        tracing::info!(request_id = %request_id, error = %e, "Seed movie not found");
        AppError::from(e)
    })?;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendations generated"
    );

    Ok(Json(RecommendResponse {
        input_movie: movie_name,
        input_rating: rating,
        recommendations,
    }))
}
