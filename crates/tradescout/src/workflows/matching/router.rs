use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::ranker::{MatchRanker, RankRequest};
use crate::workflows::store::{StoreError, TradieDirectory};

/// Router exposing the ranked-search operation.
pub fn match_router<D>(ranker: Arc<MatchRanker<D>>) -> Router
where
    D: TradieDirectory + 'static,
{
    Router::new()
        .route("/api/v1/match/rank", post(rank_handler::<D>))
        .with_state(ranker)
}

pub(crate) async fn rank_handler<D>(
    State(ranker): State<Arc<MatchRanker<D>>>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response
where
    D: TradieDirectory + 'static,
{
    match ranker.rank(&request) {
        Ok(results) => (StatusCode::OK, axum::Json(json!({ "results": results }))).into_response(),
        Err(StoreError::Unavailable(detail)) => {
            let payload = json!({ "error": format!("directory unavailable: {detail}") });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
