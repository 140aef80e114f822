use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::service::{AnalysisError, AnalysisRequest, JobAnalyzer};
use crate::workflows::store::JobArchive;

/// Router exposing the job-analysis operation.
pub fn analysis_router<A>(analyzer: Arc<JobAnalyzer<A>>) -> Router
where
    A: JobArchive + 'static,
{
    Router::new()
        .route("/api/v1/jobs/analyze", post(analyze_handler::<A>))
        .with_state(analyzer)
}

pub(crate) async fn analyze_handler<A>(
    State(analyzer): State<Arc<JobAnalyzer<A>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    A: JobArchive + 'static,
{
    match analyzer.analyze(&request) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error @ AnalysisError::DescriptionTooShort { .. }) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AnalysisError::Store(error)) => {
            let payload = json!({ "error": format!("archive unavailable: {error}") });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
