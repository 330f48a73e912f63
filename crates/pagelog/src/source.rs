//! Boundary types for console event producers.
//!
//! Whatever observes the page (a browser automation layer, a recorded
//! log, a test) pushes [`RawEvent`]s through an [`EventSender`]. The
//! pipeline drains the matching [`EventStream`] synchronously, in the
//! order events were sent. The stream ends once every sender is dropped.

use serde::{Deserialize, Serialize};
use std::sync::mpsc;

/// One console event as reported by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Console category tag (`log`, `warning`, `table`, ...)
    #[serde(rename = "type")]
    pub category: String,

    /// Formatted message text
    #[serde(default)]
    pub text: String,
}

impl RawEvent {
    /// Creates a new event.
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}

/// Producer half of an event channel.
///
/// Cheaply cloneable; each clone keeps the stream open.
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: mpsc::Sender<RawEvent>,
}

impl EventSender {
    /// Pushes one event. Returns false once the consumer is gone.
    pub fn send(&self, event: RawEvent) -> bool {
        self.inner.send(event).is_ok()
    }
}

/// Consumer half of an event channel.
#[derive(Debug)]
pub struct EventStream {
    inner: mpsc::Receiver<RawEvent>,
}

impl Iterator for EventStream {
    type Item = RawEvent;

    /// Blocks until the next event arrives or every sender is dropped.
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.recv().ok()
    }
}

/// Creates an unbounded, ordered event channel.
#[must_use]
pub fn channel() -> (EventSender, EventStream) {
    let (tx, rx) = mpsc::channel();
    (EventSender { inner: tx }, EventStream { inner: rx })
}
