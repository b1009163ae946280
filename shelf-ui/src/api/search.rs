//! Author and book search handlers
//!
//! The session lock is only held to register the query and to apply the
//! response; the lookup itself runs unlocked so a newer keystroke can be
//! registered while an older lookup is still in flight.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shelf_common::events::ShelfEvent;
use shelf_wizard::{AddOutcome, QueryDispatch, SearchKind, SearchOutcome};
use uuid::Uuid;

use crate::api::wizard::WizardView;
use crate::{error::ApiResult, AppState};

/// POST /wizard/:id/search/:kind request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// POST /wizard/:id/search/:kind response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// "presented", "stale" or "cleared"
    pub status: &'static str,
    /// Sequence number assigned to this query
    pub seq: u64,
    /// Results now on screen; absent unless `status` is "presented"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<String>>,
}

/// POST /wizard/:id/search/:kind/select request
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub value: String,
}

/// POST /wizard/:id/search/:kind/select response
#[derive(Debug, Serialize)]
pub struct SelectResponse {
    /// False when the value was already selected
    pub added: bool,
    pub wizard: WizardView,
}

/// POST /wizard/:session_id/search/:kind
pub async fn run_search(
    State(state): State<AppState>,
    Path((session_id, kind)): Path<(Uuid, SearchKind)>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<SearchResponse>> {
    let wizard = state.session(session_id).await?;

    let (ticket, backend) = {
        let mut guard = wizard.lock().await;
        match guard.begin_search(kind, &request.query) {
            QueryDispatch::Cleared => {
                return Ok(Json(SearchResponse {
                    status: "cleared",
                    seq: guard.search_controller(kind).latest_seq(),
                    results: None,
                }));
            }
            QueryDispatch::Dispatch(ticket) => (ticket, guard.search_backend()),
        }
    };

    let response = backend.search(kind, &ticket.query).await;

    let outcome = wizard.lock().await.finish_search(&ticket, response)?;

    let body = match outcome {
        SearchOutcome::Presented(results) => {
            state.event_bus.emit_lossy(ShelfEvent::SearchResultsUpdated {
                session_id,
                kind: kind.as_str().to_string(),
                seq: ticket.seq,
                results: results.clone(),
                timestamp: chrono::Utc::now(),
            });
            SearchResponse {
                status: "presented",
                seq: ticket.seq,
                results: Some(results),
            }
        }
        SearchOutcome::Stale => {
            tracing::debug!(session_id = %session_id, kind = %kind.as_str(), seq = ticket.seq, "Search superseded");
            SearchResponse {
                status: "stale",
                seq: ticket.seq,
                results: None,
            }
        }
        SearchOutcome::Cleared => SearchResponse {
            status: "cleared",
            seq: ticket.seq,
            results: None,
        },
    };

    Ok(Json(body))
}

/// POST /wizard/:session_id/search/:kind/select
pub async fn select_result(
    State(state): State<AppState>,
    Path((session_id, kind)): Path<(Uuid, SearchKind)>,
    Json(request): Json<SelectRequest>,
) -> ApiResult<Json<SelectResponse>> {
    let wizard = state.session(session_id).await?;
    let mut wizard = wizard.lock().await;

    let outcome = wizard.select_search_result(kind, request.value)?;

    Ok(Json(SelectResponse {
        added: outcome == AddOutcome::Added,
        wizard: WizardView::from(&*wizard),
    }))
}

/// DELETE /wizard/:session_id/search/:kind
///
/// Hide the result list (focus left the search box). Returns 204.
pub async fn hide_results(
    State(state): State<AppState>,
    Path((session_id, kind)): Path<(Uuid, SearchKind)>,
) -> ApiResult<StatusCode> {
    let wizard = state.session(session_id).await?;
    wizard.lock().await.hide_search_results(kind);
    Ok(StatusCode::NO_CONTENT)
}

/// Build search routes
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/wizard/:session_id/search/:kind",
            post(run_search).delete(hide_results),
        )
        .route("/wizard/:session_id/search/:kind/select", post(select_result))
}
