//! Presentation event boundary
//!
//! The engine announces what happened; how it is drawn or played is up to
//! whoever listens. Notifications are fire-and-forget.

use pokecard_cards::ElementalType;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationKind {
    Attack,
    Hit,
    Heal,
    Faint,
}

/// One presentation notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationEvent {
    pub side: Side,
    pub kind: PresentationKind,
    pub element: Option<ElementalType>,
    /// Battle clock, in milliseconds
    pub timestamp: u64,
}

/// Receives presentation notifications from the engine
pub trait PresentationSink {
    fn notify(&mut self, event: PresentationEvent);
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn notify(&mut self, _event: PresentationEvent) {}
}

/// Sink that keeps every event, for tests and replays
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<PresentationEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events of one kind, in order
    pub fn of_kind(&self, kind: PresentationKind) -> Vec<&PresentationEvent> {
        self.events.iter().filter(|e| e.kind == kind).collect()
    }
}

impl PresentationSink for RecordingSink {
    fn notify(&mut self, event: PresentationEvent) {
        self.events.push(event);
    }
}

/// Forward events to an async consumer. A closed channel is ignored.
impl PresentationSink for mpsc::UnboundedSender<PresentationEvent> {
    fn notify(&mut self, event: PresentationEvent) {
        if self.send(event).is_err() {
            tracing::debug!(kind = ?event.kind, "presentation receiver dropped");
        }
    }
}
