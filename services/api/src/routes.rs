use crate::infra::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tradescout::workflows::analysis::{analysis_router, JobAnalyzer};
use tradescout::workflows::documents::{DocumentError, DocumentKind, DocumentStore};
use tradescout::workflows::matching::{match_router, MatchRanker};
use tradescout::workflows::store::{JobArchive, TradieDirectory};

pub(crate) fn with_workflow_routes<D, A, S>(
    ranker: Arc<MatchRanker<D>>,
    analyzer: Arc<JobAnalyzer<A>>,
    documents: Arc<S>,
) -> axum::Router
where
    D: TradieDirectory + 'static,
    A: JobArchive + 'static,
    S: DocumentStore + 'static,
{
    match_router(ranker)
        .merge(analysis_router(analyzer))
        .route(
            "/api/v1/docs/:category/:kind",
            axum::routing::get(document_endpoint::<S>).with_state(documents),
        )
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn document_endpoint<S>(
    State(documents): State<Arc<S>>,
    Path((category, kind)): Path<(String, String)>,
) -> impl IntoResponse
where
    S: DocumentStore + 'static,
{
    let Some(kind) = DocumentKind::parse(&kind) else {
        let payload = json!({ "error": format!("unknown document kind '{kind}'") });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    };

    match documents.read_document(&category, kind) {
        Ok(body) => (
            StatusCode::OK,
            Json(json!({ "category": category, "kind": kind, "body": body })),
        )
            .into_response(),
        Err(error @ DocumentError::NotFound { .. }) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryJobArchive, InMemoryTradieDirectory};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use tradescout::workflows::documents::StaticDocumentLibrary;

    fn test_router() -> axum::Router {
        let ranker = Arc::new(MatchRanker::new(Arc::new(InMemoryTradieDirectory::seeded())));
        let analyzer = Arc::new(JobAnalyzer::new(Arc::new(InMemoryJobArchive::seeded())));
        let documents = Arc::new(StaticDocumentLibrary::builtin());
        with_workflow_routes(ranker, analyzer, documents)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn document_endpoint_serves_builtin_checklist() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/docs/painting/checklist")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["category"], "painting");
        assert!(body["body"].as_str().expect("body text").contains("room count"));
    }

    #[tokio::test]
    async fn document_endpoint_rejects_unknown_kind() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/docs/painting/blueprints")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn document_endpoint_misses_unknown_category() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/docs/plumbing/checklist")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
