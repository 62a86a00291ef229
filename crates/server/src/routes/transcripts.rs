use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use models::wire::{AddGradeRequest, CreateStudentRequest, CreatedStudent, GradeReport};
use models::{StudentId, Transcript};
use service::TranscriptStore;

use crate::errors::ApiError;

/// Shared handler state. The store itself is lock-free by design; the
/// RwLock here is the external serialization the store's single-writer
/// contract requires.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<RwLock<TranscriptStore>>,
}

impl ServerState {
    pub fn new(store: TranscriptStore) -> Self {
        Self { store: Arc::new(RwLock::new(store)) }
    }
}

/// POST /transcripts → 201 { studentID } | 400
pub async fn create_student(
    State(state): State<ServerState>,
    Json(input): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<CreatedStudent>), ApiError> {
    let name = input.student_name.unwrap_or_default();
    let mut store = state.store.write().await;
    let id = store.add_student(&name)?;
    Ok((StatusCode::CREATED, Json(CreatedStudent { student_id: id })))
}

/// GET /transcripts → 200 [Transcript]
pub async fn list_transcripts(State(state): State<ServerState>) -> Json<Vec<Transcript>> {
    let store = state.store.read().await;
    Json(store.all_transcripts())
}

/// GET /transcripts/:id → 200 Transcript | 404
pub async fn get_transcript(
    State(state): State<ServerState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Transcript>, ApiError> {
    let store = state.store.read().await;
    match store.transcript(id) {
        Some(t) => Ok(Json(t)),
        None => Err(ApiError::not_found(format!("student {id} not found"))),
    }
}

/// DELETE /transcripts/:id → 204 | 404
pub async fn delete_student(
    State(state): State<ServerState>,
    Path(id): Path<StudentId>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_student(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

/// GET /studentids?name= → 200 [studentID] (empty array when none match)
pub async fn student_ids(
    State(state): State<ServerState>,
    Query(q): Query<NameQuery>,
) -> Json<Vec<StudentId>> {
    let store = state.store.read().await;
    Json(store.student_ids(&q.name))
}

/// POST /transcripts/:id/:course → 201 | 404 unknown student | 409 duplicate
/// course | 400 non-numeric grade
pub async fn add_grade(
    State(state): State<ServerState>,
    Path((id, course)): Path<(StudentId, String)>,
    Json(input): Json<AddGradeRequest>,
) -> Result<StatusCode, ApiError> {
    // 非数值成绩（如字符串）在这里拦截，返回 400 而不是 422
    let grade = input
        .grade
        .as_f64()
        .ok_or_else(|| ApiError::bad_request(format!("grade must be a number, got {}", input.grade)))?;
    let mut store = state.store.write().await;
    store.add_grade(id, &course, grade)?;
    Ok(StatusCode::CREATED)
}

/// GET /transcripts/:id/:course → 200 { studentID, course, grade } | 404
pub async fn get_grade(
    State(state): State<ServerState>,
    Path((id, course)): Path<(StudentId, String)>,
) -> Result<Json<GradeReport>, ApiError> {
    let store = state.store.read().await;
    let grade = store.grade(id, &course)?;
    Ok(Json(GradeReport { student_id: id, course, grade }))
}
