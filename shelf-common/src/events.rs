//! Event types for the Shelfwise event system
//!
//! Provides the shared event definitions and the EventBus used by the wizard
//! adapter to fan notices and state changes out to connected clients.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Blocking error notice
    Error,
    /// Non-blocking informational notice
    Info,
}

/// Shelfwise event types
///
/// Every event is tagged with the wizard session it belongs to so that
/// subscribers can filter a shared bus down to one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShelfEvent {
    /// A notice should be shown to the user
    NoticeRaised {
        session_id: Uuid,
        level: NoticeLevel,
        title: String,
        message: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The active wizard step changed
    StepChanged {
        session_id: Uuid,
        old_step: u8,
        new_step: u8,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A fresh search result set is being presented
    ///
    /// Only emitted for the latest issued query; stale responses never
    /// produce this event.
    SearchResultsUpdated {
        session_id: Uuid,
        kind: String,
        seq: u64,
        results: Vec<String>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The recommendation submission completed
    RecommendationsReady {
        session_id: Uuid,
        count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The wizard was returned to step 1 with empty selections
    WizardReset {
        session_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The wizard session was discarded; no further events follow for it
    WizardClosed {
        session_id: Uuid,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl ShelfEvent {
    /// Event name used as the SSE `event:` field
    pub fn event_type(&self) -> &str {
        match self {
            ShelfEvent::NoticeRaised { .. } => "NoticeRaised",
            ShelfEvent::StepChanged { .. } => "StepChanged",
            ShelfEvent::SearchResultsUpdated { .. } => "SearchResultsUpdated",
            ShelfEvent::RecommendationsReady { .. } => "RecommendationsReady",
            ShelfEvent::WizardReset { .. } => "WizardReset",
            ShelfEvent::WizardClosed { .. } => "WizardClosed",
        }
    }

    /// Session the event belongs to
    pub fn session_id(&self) -> Uuid {
        match self {
            ShelfEvent::NoticeRaised { session_id, .. }
            | ShelfEvent::StepChanged { session_id, .. }
            | ShelfEvent::SearchResultsUpdated { session_id, .. }
            | ShelfEvent::RecommendationsReady { session_id, .. }
            | ShelfEvent::WizardReset { session_id, .. }
            | ShelfEvent::WizardClosed { session_id, .. } => *session_id,
        }
    }
}

/// Broadcast channel for ShelfEvents
///
/// Cloning the bus shares the underlying channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ShelfEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before slow receivers start
    ///   missing old events
    ///
    /// # Examples
    ///
    /// ```
    /// use shelf_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<ShelfEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: ShelfEvent,
    ) -> Result<usize, broadcast::error::SendError<ShelfEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: ShelfEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
