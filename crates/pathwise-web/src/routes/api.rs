//! REST API endpoints for learning paths.

use crate::state::AppState;
use crate::thumbnail::youtube_thumbnail;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pathwise_core::error::{PathwiseError, RequestError};
use pathwise_core::types::{ContentType, Difficulty, Preferences};
use pathwise_rank::{LearningPath, Recommendation, ScoringMode};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Error body `{"error": ".."}` with the matching status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<PathwiseError> for ApiError {
    fn from(e: PathwiseError) -> Self {
        let status = match &e {
            PathwiseError::Request(_) => StatusCode::BAD_REQUEST,
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %e, "Request failed");
        }
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        PathwiseError::Request(RequestError::InvalidBody(rejection.body_text())).into()
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        tracing::error!(error = %e, "Scoring task failed");
        Self::internal("Internal error while scoring resources.")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Plain-text banner for liveness checks by humans.
pub async fn index() -> &'static str {
    "Personalized Learning Path API is running."
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub scoring: ScoringMode,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "API is healthy",
        scoring: state.engine().scoring_mode(),
    })
}

/// Learning path request body.
#[derive(Debug, Deserialize)]
pub struct LearningPathRequest {
    #[serde(default)]
    pub known_topic: Option<String>,
    #[serde(default)]
    pub goal_topic: Option<String>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

/// A recommended resource on the wire.
#[derive(Debug, Serialize)]
pub struct ResourceView {
    pub title: String,
    pub url: String,
    pub final_score: f64,
    pub semantic_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ml_score: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl From<Recommendation> for ResourceView {
    fn from(r: Recommendation) -> Self {
        let thumbnail = youtube_thumbnail(&r.url);
        Self {
            title: r.title,
            url: r.url,
            final_score: r.final_score,
            semantic_score: r.semantic_score,
            ml_score: r.ml_score,
            content_type: r.content_type,
            difficulty: r.difficulty,
            length: r.length,
            thumbnail,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub topic: String,
    pub recommended_resources: Vec<ResourceView>,
}

/// Learning path response.
#[derive(Debug, Serialize)]
pub struct LearningPathResponse {
    pub learning_path: Vec<StepView>,
}

impl From<LearningPath> for LearningPathResponse {
    fn from(path: LearningPath) -> Self {
        Self {
            learning_path: path
                .steps
                .into_iter()
                .map(|step| StepView {
                    topic: step.topic,
                    recommended_resources: step
                        .recommended_resources
                        .into_iter()
                        .map(ResourceView::from)
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Resolve the prerequisite path and rank resources for every step.
pub async fn get_learning_path(
    State(state): State<AppState>,
    body: Result<Json<LearningPathRequest>, JsonRejection>,
) -> Result<Json<LearningPathResponse>, ApiError> {
    let Json(req) = body?;

    let known = req.known_topic.unwrap_or_default();
    let goal = req.goal_topic.unwrap_or_default();
    if known.trim().is_empty() || goal.trim().is_empty() {
        return Err(PathwiseError::missing_topics().into());
    }
    let prefs = req.preferences.unwrap_or_default();

    let path = state
        .with_engine(move |engine| engine.recommend(&known, &goal, &prefs))
        .await??;

    Ok(Json(path.into()))
}

/// Topic listing query.
#[derive(Debug, Deserialize)]
pub struct TopicsQuery {
    pub known: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
}

/// All topics, or the goals reachable from `known`.
pub async fn get_topics(
    State(state): State<AppState>,
    Query(query): Query<TopicsQuery>,
) -> Result<Json<TopicsResponse>, ApiError> {
    let graph = state.engine().graph();
    let topics = match query.known.as_deref().map(str::trim) {
        Some(known) if !known.is_empty() => graph
            .reachable_from(known)?
            .into_iter()
            .map(|t| t.label.clone())
            .collect(),
        _ => graph.topics().map(|t| t.label.clone()).collect(),
    };
    Ok(Json(TopicsResponse { topics }))
}

/// Search request body.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<ResourceView>,
}

/// Semantic search over the whole catalog.
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(req) = body?;
    let top_k = req.top_k.unwrap_or(state.search_top_k());

    let results = state
        .with_engine(move |engine| engine.search(&req.query, top_k))
        .await??;

    Ok(Json(SearchResponse {
        results: results.into_iter().map(ResourceView::from).collect(),
    }))
}
