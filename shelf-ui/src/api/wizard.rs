//! Wizard session API handlers
//!
//! POST /wizard, GET|DELETE /wizard/:id, POST /wizard/:id/{input,next,back,reset,retry},
//! GET /genres

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use shelf_common::events::ShelfEvent;
use shelf_wizard::catalog::genre_options;
use shelf_wizard::{
    FieldInput, RecommendationOutcome, SearchController, SearchKind, Transition,
    WizardController, WizardState,
};
use uuid::Uuid;

use crate::{error::ApiResult, AppState};

/// Presentation state of one search box
#[derive(Debug, Serialize)]
pub struct SearchView {
    pub query: String,
    /// `None` while the result list is hidden
    pub results: Option<Vec<String>>,
    pub pending: bool,
}

impl From<&SearchController> for SearchView {
    fn from(search: &SearchController) -> Self {
        Self {
            query: search.query().to_string(),
            results: search.presented().map(|results| results.to_vec()),
            pending: search.is_pending(),
        }
    }
}

/// Snapshot of a wizard session returned by every wizard endpoint
#[derive(Debug, Serialize)]
pub struct WizardView {
    pub session_id: Uuid,
    pub step: u8,
    pub total_steps: u8,
    pub progress_percent: u8,
    pub state: WizardState,
    pub author_search: SearchView,
    pub book_search: SearchView,
    pub outcome: Option<RecommendationOutcome>,
    /// Only filled once results are on screen
    pub highlights: Vec<String>,
}

impl From<&WizardController> for WizardView {
    fn from(wizard: &WizardController) -> Self {
        let highlights = if wizard.outcome().is_some() {
            wizard.highlights()
        } else {
            Vec::new()
        };

        Self {
            session_id: wizard.session_id(),
            step: wizard.current_step(),
            total_steps: wizard.total_steps(),
            progress_percent: wizard.progress_percent(),
            state: wizard.state().clone(),
            author_search: SearchView::from(wizard.search_controller(SearchKind::Authors)),
            book_search: SearchView::from(wizard.search_controller(SearchKind::Books)),
            outcome: wizard.outcome().cloned(),
            highlights,
        }
    }
}

/// GET /genres entry
#[derive(Debug, Serialize)]
pub struct GenreOption {
    pub value: String,
    pub label: &'static str,
}

fn emit_step_change(state: &AppState, session_id: Uuid, old_step: u8, new_step: u8) {
    if old_step == new_step {
        return;
    }
    state.event_bus.emit_lossy(ShelfEvent::StepChanged {
        session_id,
        old_step,
        new_step,
        timestamp: chrono::Utc::now(),
    });
}

fn emit_recommendations(state: &AppState, session_id: Uuid, outcome: &RecommendationOutcome) {
    let count = match outcome {
        RecommendationOutcome::Matches(books) => books.len(),
        RecommendationOutcome::NoMatches => 0,
    };
    tracing::info!(session_id = %session_id, count, "Recommendations ready");
    state.event_bus.emit_lossy(ShelfEvent::RecommendationsReady {
        session_id,
        count,
        timestamp: chrono::Utc::now(),
    });
}

/// POST /wizard
///
/// Start a session on step 1. Returns 201 Created.
pub async fn create_wizard(State(state): State<AppState>) -> (StatusCode, Json<WizardView>) {
    let (_, wizard) = state.create_session().await;
    let wizard = wizard.lock().await;
    (StatusCode::CREATED, Json(WizardView::from(&*wizard)))
}

/// GET /wizard/:session_id
pub async fn get_wizard(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<WizardView>> {
    let wizard = state.session(session_id).await?;
    let wizard = wizard.lock().await;
    Ok(Json(WizardView::from(&*wizard)))
}

/// POST /wizard/:session_id/input
///
/// Apply one form interaction. Rejected genre picks return an error and
/// leave the selection unchanged.
pub async fn apply_input(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<FieldInput>,
) -> ApiResult<Json<WizardView>> {
    let wizard = state.session(session_id).await?;
    let mut wizard = wizard.lock().await;
    wizard.apply(input)?;
    Ok(Json(WizardView::from(&*wizard)))
}

/// POST /wizard/:session_id/next
///
/// Validate and advance. Reaching the results step submits the profile
/// before responding.
pub async fn next_step(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<WizardView>> {
    let wizard = state.session(session_id).await?;
    let mut wizard = wizard.lock().await;

    let old_step = wizard.current_step();
    let result = wizard.advance().await;
    // A failed submission still lands on the results step
    emit_step_change(&state, session_id, old_step, wizard.current_step());

    if let Transition::Submitted(outcome) = result? {
        emit_recommendations(&state, session_id, &outcome);
    }

    Ok(Json(WizardView::from(&*wizard)))
}

/// POST /wizard/:session_id/back
pub async fn previous_step(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<WizardView>> {
    let wizard = state.session(session_id).await?;
    let mut wizard = wizard.lock().await;

    if let Transition::Moved { from, to } = wizard.retreat() {
        emit_step_change(&state, session_id, from, to);
    }

    Ok(Json(WizardView::from(&*wizard)))
}

/// POST /wizard/:session_id/reset
pub async fn reset_wizard(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<WizardView>> {
    let wizard = state.session(session_id).await?;
    let mut wizard = wizard.lock().await;

    let old_step = wizard.current_step();
    wizard.reset();
    emit_step_change(&state, session_id, old_step, wizard.current_step());
    state.event_bus.emit_lossy(ShelfEvent::WizardReset {
        session_id,
        timestamp: chrono::Utc::now(),
    });

    Ok(Json(WizardView::from(&*wizard)))
}

/// DELETE /wizard/:session_id
///
/// Discard the session. Open event streams for it end after `WizardClosed`.
pub async fn delete_wizard(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.remove_session(session_id).await?;
    state.event_bus.emit_lossy(ShelfEvent::WizardClosed {
        session_id,
        timestamp: chrono::Utc::now(),
    });

    Ok(StatusCode::NO_CONTENT)
}

/// POST /wizard/:session_id/retry
///
/// Resubmit from the results step. 409 Conflict anywhere else.
pub async fn retry_submission(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<WizardView>> {
    let wizard = state.session(session_id).await?;
    let mut wizard = wizard.lock().await;

    let outcome = wizard.retry_submission().await?;
    emit_recommendations(&state, session_id, &outcome);

    Ok(Json(WizardView::from(&*wizard)))
}

/// GET /genres
pub async fn list_genres() -> Json<Vec<GenreOption>> {
    Json(
        genre_options()
            .into_iter()
            .map(|(value, label)| GenreOption { value, label })
            .collect(),
    )
}

/// Build wizard routes
pub fn wizard_routes() -> Router<AppState> {
    Router::new()
        .route("/wizard", post(create_wizard))
        .route("/wizard/:session_id", get(get_wizard).delete(delete_wizard))
        .route("/wizard/:session_id/input", post(apply_input))
        .route("/wizard/:session_id/next", post(next_step))
        .route("/wizard/:session_id/back", post(previous_step))
        .route("/wizard/:session_id/reset", post(reset_wizard))
        .route("/wizard/:session_id/retry", post(retry_submission))
        .route("/genres", get(list_genres))
}
