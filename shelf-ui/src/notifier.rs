//! Forwards wizard notices onto the event bus

use shelf_common::events::{EventBus, ShelfEvent};
use shelf_wizard::{Notice, Notifier};
use tracing::debug;
use uuid::Uuid;

/// Publishes each notice as a `NoticeRaised` event for one session
pub struct EventBusNotifier {
    session_id: Uuid,
    event_bus: EventBus,
}

impl EventBusNotifier {
    pub fn new(session_id: Uuid, event_bus: EventBus) -> Self {
        Self {
            session_id,
            event_bus,
        }
    }
}

impl Notifier for EventBusNotifier {
    fn notify(&self, notice: Notice) {
        debug!(session_id = %self.session_id, title = %notice.title, "Raising notice");
        self.event_bus.emit_lossy(ShelfEvent::NoticeRaised {
            session_id: self.session_id,
            level: notice.level,
            title: notice.title,
            message: notice.message,
            timestamp: chrono::Utc::now(),
        });
    }
}
