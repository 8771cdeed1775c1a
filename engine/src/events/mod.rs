//! Event bus for pipeline-to-frontend communication
//!
//! The enhancement pipeline runs on worker tasks; UI-adjacent state must
//! only change on the coordinating task. The EventBus delivers status and
//! completion events over bounded channels so the coordinator consumes
//! them as a single ordered stream. The pipeline's single-flight guard
//! guarantees completion events never interleave.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Channel buffer size for bounded channels
const CHANNEL_BUFFER_SIZE: usize = 100;

/// Event types that can be published on the bus
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum EventType {
    /// An enhancement request was accepted and dispatched
    EnhancementStarted,
    /// An enhancement finished with a cleaned result
    EnhancementCompleted,
    /// An enhancement failed
    EnhancementFailed,
    /// User-visible progress text (e.g. the live-search notice)
    Status,
    /// Subscribe to all event types
    All,
}

/// Events that can be published on the bus
#[derive(Debug, Clone)]
pub enum Event {
    /// Enhancement accepted with the request text
    EnhancementStarted { input: String },
    /// Enhancement finished with the cleaned result
    EnhancementCompleted { result: String },
    /// Enhancement failed with a user-safe message
    EnhancementFailed { error: String },
    /// Progress text for the status line
    Status { message: String },
}

impl Event {
    /// Get the event type for this event
    pub fn event_type(&self) -> EventType {
        match self {
            Event::EnhancementStarted { .. } => EventType::EnhancementStarted,
            Event::EnhancementCompleted { .. } => EventType::EnhancementCompleted,
            Event::EnhancementFailed { .. } => EventType::EnhancementFailed,
            Event::Status { .. } => EventType::Status,
        }
    }
}

/// Pub/sub bus with bounded channels.
///
/// Subscribers register for a specific event type or `EventType::All`;
/// publishing is fire-and-forget (a full or dropped subscriber channel is
/// ignored, never an error for the publisher).
pub struct EventBus {
    channels: Arc<Mutex<HashMap<EventType, Vec<mpsc::Sender<Event>>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe to a specific event type.
    ///
    /// Returns a bounded receiver for events of that type.
    pub async fn subscribe(&self, event_type: EventType) -> mpsc::Receiver<Event> {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let mut channels = self.channels.lock().await;
        channels.entry(event_type).or_default().push(tx);
        rx
    }

    /// Publish an event to all subscribers of its type and of `All`.
    pub async fn publish(&self, event: Event) {
        let channels = self.channels.lock().await;
        let event_type = event.event_type();

        if let Some(subscribers) = channels.get(&event_type) {
            for tx in subscribers {
                // Ignore send errors (subscriber may have dropped receiver)
                let _ = tx.send(event.clone()).await;
            }
        }

        if let Some(subscribers) = channels.get(&EventType::All) {
            for tx in subscribers {
                let _ = tx.send(event.clone()).await;
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
