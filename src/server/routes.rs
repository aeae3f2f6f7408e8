use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::Error;
use crate::extract::ExtractionOrchestrator;
use crate::server::AppState;
use crate::storage::OnConflict;
use crate::taxonomy::{self, TaxonomyIndex};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct LinkRequest {
    pub course_name: String,
    #[serde(default)]
    pub course_body: String,
    pub competency_name: String,
    #[serde(default)]
    pub competency_body: String,
}

type Rejection = (StatusCode, Json<ErrorResponse>);

fn reject(err: Error) -> Rejection {
    let status = if err.is_caller_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ErrorResponse { error: err.to_string() }))
}

fn parse_id(key: &str, what: &str) -> Result<i64, Rejection> {
    key.parse::<i64>().map_err(|_| {
        reject(Error::InvalidInput(format!("{what} id '{key}' is not an integer")))
    })
}

pub async fn welcome() -> &'static str {
    "Welcome to the skillgraph API. Query courses and competencies here."
}

/// Rebuild the taxonomy index from the catalog file and swap it in.
///
/// Idempotent; a failed rebuild leaves the previous snapshot (and all
/// persisted competency rows) untouched.
pub async fn initialize(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let catalog = taxonomy::load_catalog(&state.catalog_path).map_err(reject)?;
    let index = TaxonomyIndex::build(catalog).map_err(reject)?;
    let entries = index.len();

    *state.index.write().expect("taxonomy index lock poisoned") = Some(Arc::new(index));

    Ok(Json(serde_json::json!({
        "status": "initialized",
        "entries": entries,
    })))
}

pub async fn create_competency(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: String,
) -> Result<Json<serde_json::Value>, Rejection> {
    let mut store = state.store.lock().await;
    let competency = store
        .add_competency(&name, &body, OnConflict::Fail)
        .map_err(reject)?;

    Ok(Json(serde_json::json!({ "competency": competency })))
}

pub async fn create_course(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: String,
) -> Result<Json<serde_json::Value>, Rejection> {
    let mut store = state.store.lock().await;
    let course = store.add_course(&name, &body).map_err(reject)?;

    Ok(Json(serde_json::json!({ "course": course })))
}

pub async fn list_competencies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let store = state.store.lock().await;
    let competencies = store.list_competencies().map_err(reject)?;

    Ok(Json(serde_json::json!({ "competencies": competencies })))
}

pub async fn list_courses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let store = state.store.lock().await;
    let courses = store.list_courses().map_err(reject)?;

    Ok(Json(serde_json::json!({ "courses": courses })))
}

/// `GET /competency/{course_id}` - competencies a course teaches
pub async fn competencies_by_course(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let course_id = parse_id(&key, "course")?;
    let store = state.store.lock().await;
    let competencies = store.competencies_by_course(course_id).map_err(reject)?;

    Ok(Json(serde_json::json!({ "competencies": competencies })))
}

/// `GET /course/{competency_id}` - courses teaching a competency
pub async fn courses_by_competency(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let competency_id = parse_id(&key, "competency")?;
    let store = state.store.lock().await;
    let courses = store.courses_by_competency(competency_id).map_err(reject)?;

    Ok(Json(serde_json::json!({ "courses": courses })))
}

pub async fn link_course_competency(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LinkRequest>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let mut store = state.store.lock().await;
    let mut orchestrator = ExtractionOrchestrator::new(&mut store);
    let relation = orchestrator
        .link_course_competency(
            &request.course_name,
            &request.course_body,
            &request.competency_name,
            &request.competency_body,
        )
        .map_err(reject)?;

    Ok(Json(serde_json::json!({ "relation": relation })))
}

/// `POST /course/{name}/extract` - create a course and extract its
/// competency relations from the request body text
pub async fn extract_course(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: String,
) -> Result<Json<serde_json::Value>, Rejection> {
    let Some(index) = state.index_snapshot() else {
        return Err(reject(Error::TaxonomyLoad(
            "taxonomy is not initialized; POST /initialize first".to_string(),
        )));
    };

    let mut store = state.store.lock().await;
    let (course, relations) = {
        let mut orchestrator = ExtractionOrchestrator::new(&mut store);
        orchestrator
            .add_course_and_extract(&name, &body, &index, state.threshold)
            .map_err(reject)?
    };
    let competencies = store.competencies_by_course(course.id).map_err(reject)?;

    Ok(Json(serde_json::json!({
        "course": course,
        "competencies": competencies,
        "relations": relations,
    })))
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let store = state.store.lock().await;
    let stats = store.stats().map_err(reject)?;

    Ok(Json(serde_json::to_value(&stats).map_err(|e| reject(e.into()))?))
}
