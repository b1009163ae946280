//! shelf-ui library interface
//!
//! HTTP adapter around the reading-preference wizard: one `WizardController`
//! per session, JSON endpoints for every interaction, and an SSE stream that
//! carries notices and state changes back to the browser.

pub mod api;
pub mod error;
pub mod notifier;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use shelf_common::events::EventBus;
use shelf_wizard::{RecommendationService, SearchBackend, WizardController};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::notifier::EventBusNotifier;

/// One wizard session, locked per request
pub type SharedWizard = Arc<Mutex<WizardController>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Active wizard sessions by id
    pub sessions: Arc<RwLock<HashMap<Uuid, SharedWizard>>>,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    pub search_backend: Arc<dyn SearchBackend>,
    pub recommender: Arc<dyn RecommendationService>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        search_backend: Arc<dyn SearchBackend>,
        recommender: Arc<dyn RecommendationService>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            event_bus,
            search_backend,
            recommender,
            startup_time: Utc::now(),
        }
    }

    /// Start a fresh wizard and register it
    pub async fn create_session(&self) -> (Uuid, SharedWizard) {
        let session_id = Uuid::new_v4();
        let notifier = Arc::new(EventBusNotifier::new(session_id, self.event_bus.clone()));
        let wizard = WizardController::with_session_id(
            session_id,
            Arc::clone(&self.search_backend),
            Arc::clone(&self.recommender),
            notifier,
        );
        let shared = Arc::new(Mutex::new(wizard));

        self.sessions
            .write()
            .await
            .insert(session_id, Arc::clone(&shared));

        tracing::info!(session_id = %session_id, "Wizard session created");
        (session_id, shared)
    }

    /// Look up a session or fail with 404
    pub async fn session(&self, session_id: Uuid) -> ApiResult<SharedWizard> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Wizard session not found: {}", session_id)))
    }

    /// Drop a session; later lookups fail with 404
    pub async fn remove_session(&self, session_id: Uuid) -> ApiResult<()> {
        if self.sessions.write().await.remove(&session_id).is_none() {
            return Err(ApiError::NotFound(format!(
                "Wizard session not found: {}",
                session_id
            )));
        }

        tracing::info!(session_id = %session_id, "Wizard session closed");
        Ok(())
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::wizard_routes())
        .merge(api::search_routes())
        .route("/wizard/:session_id/events", get(api::wizard_event_stream))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
