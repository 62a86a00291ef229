use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod transcripts;

pub use transcripts::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: one route per store operation plus a
/// liveness probe.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/transcripts",
            post(transcripts::create_student).get(transcripts::list_transcripts),
        )
        .route(
            "/transcripts/:id",
            get(transcripts::get_transcript).delete(transcripts::delete_student),
        )
        .route(
            "/transcripts/:id/:course",
            post(transcripts::add_grade).get(transcripts::get_grade),
        )
        .route("/studentids", get(transcripts::student_ids))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
