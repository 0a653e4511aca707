//! Event Bus
//!
//! Publish-subscribe sink: every emitted event is broadcast to all current
//! subscribers. Slow subscribers lag rather than block dispatch.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use switchyard_core::EventSink;

pub const DEFAULT_CAPACITY: usize = 64;

pub struct BroadcastSink<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone> BroadcastSink<E> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { sender: tx }
    }

    /// A receiver for every event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<E: Clone> Default for BroadcastSink<E> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl<E> EventSink<E> for BroadcastSink<E>
where
    E: Clone + Send + Sync + 'static,
{
    async fn emit(&self, event: E) {
        // No subscribers is not an error.
        if self.sender.send(event).is_err() {
            debug!("[Bus] event dropped, no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_events() {
        let bus = BroadcastSink::<&'static str>::new(8);
        let mut rx = bus.subscribe();
        bus.emit("run").await;
        bus.emit("success").await;
        assert_eq!(rx.recv().await.unwrap(), "run");
        assert_eq!(rx.recv().await.unwrap(), "success");
    }

    #[tokio::test]
    async fn emit_without_subscribers_is_silent() {
        let bus = BroadcastSink::<u8>::default();
        assert_eq!(bus.subscriber_count(), 0);
        bus.emit(1).await;
    }
}
