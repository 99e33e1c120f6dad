//! EventSink - the send half of the shared event channel.

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::Event;

/// Clonable send handle onto the bridge's event channel.
///
/// The channel is bounded and multi-producer, single-consumer: every
/// adapter holds a sink, the (external) router holds the receiver. When
/// the channel is full, `emit` blocks the producing adapter so a slow
/// consumer throttles producers instead of events being dropped silently.
///
/// Delivery is best-effort: if the consumer is gone the event is dropped
/// with a warning, never a crash.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<Event>,
}

impl EventSink {
    /// Wraps the send half of a bounded event channel.
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }

    /// Pushes one event onto the channel, waiting for capacity if needed.
    pub async fn emit(&self, event: Event) {
        if let Err(mpsc::error::SendError(event)) = self.tx.send(event).await {
            warn!(
                source = %event.source,
                kind = %event.kind,
                "event channel closed, dropping event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Placeholder;
    use std::time::Duration;

    #[tokio::test]
    async fn emit_delivers_in_order() {
        let (tx, mut rx) = mpsc::channel(8);
        let sink = EventSink::new(tx);

        sink.emit(Event::new("web", "get")).await;
        sink.emit(Event::new("web", "post")).await;

        assert_eq!(rx.recv().await.unwrap().kind, "get");
        assert_eq!(rx.recv().await.unwrap().kind, "post");
    }

    #[tokio::test]
    async fn emit_blocks_when_channel_is_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let sink = EventSink::new(tx);

        sink.emit(Event::new("web", "get")).await;

        let second = tokio::spawn({
            let sink = sink.clone();
            async move {
                sink.emit(Event::new("web", "post").with(Placeholder::string("k", "v")))
                    .await;
            }
        });

        // The channel is full, so the second emit cannot have finished yet.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!second.is_finished());

        // Draining one slot unblocks the producer.
        assert_eq!(rx.recv().await.unwrap().kind, "get");
        second.await.unwrap();
        assert_eq!(rx.recv().await.unwrap().kind, "post");
    }

    #[tokio::test]
    async fn emit_into_closed_channel_does_not_panic() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let sink = EventSink::new(tx);
        sink.emit(Event::new("web", "get")).await;
    }
}
