//! Server-Sent Events (SSE) for wizard sessions
//!
//! One stream per session; events belonging to other sessions on the shared
//! bus are filtered out.

use crate::{error::ApiResult, AppState};
use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use shelf_common::events::ShelfEvent;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// GET /wizard/:session_id/events - SSE event stream for one wizard
///
/// Streams events:
/// - NoticeRaised
/// - StepChanged
/// - SearchResultsUpdated
/// - RecommendationsReady
/// - WizardReset
/// - WizardClosed (last event of the stream)
pub async fn wizard_event_stream(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    // 404 before upgrading to a stream
    state.session(session_id).await?;

    info!(session_id = %session_id, "New SSE client connected to wizard events");

    let mut rx = state.event_bus.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if event.session_id() != session_id {
                        continue;
                    }

                    let event_type = event.event_type();
                    match serde_json::to_string(&event) {
                        Ok(event_json) => {
                            debug!("SSE: Sending wizard event: {}", event_type);
                            yield Ok(Event::default().event(event_type).data(event_json));
                        }
                        Err(e) => {
                            warn!("SSE: Failed to serialize event {}: {}", event_type, e);
                        }
                    }

                    if matches!(event, ShelfEvent::WizardClosed { .. }) {
                        info!(session_id = %session_id, "SSE: Wizard closed, ending stream");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(session_id = %session_id, skipped, "SSE: Client lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    ))
}
