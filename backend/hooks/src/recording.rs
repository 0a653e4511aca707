//! In-memory sink that keeps every event it receives.
use async_trait::async_trait;
use tokio::sync::Mutex;

use switchyard_core::{EventKind, EventSink, SubcommandEvent};

#[derive(Debug)]
pub struct RecordingSink<E> {
    events: Mutex<Vec<E>>,
}

impl<E> Default for RecordingSink<E> {
    fn default() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

impl<E: Clone> RecordingSink<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub async fn events(&self) -> Vec<E> {
        self.events.lock().await.clone()
    }

    /// Drain the recorded events.
    pub async fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.lock().await)
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.lock().await.is_empty()
    }
}

impl RecordingSink<SubcommandEvent> {
    pub async fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().await.iter().map(SubcommandEvent::kind).collect()
    }

    pub async fn names(&self) -> Vec<&'static str> {
        self.events.lock().await.iter().map(SubcommandEvent::name).collect()
    }
}

#[async_trait]
impl<E> EventSink<E> for RecordingSink<E>
where
    E: Send + 'static,
{
    async fn emit(&self, event: E) {
        self.events.lock().await.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_in_order_and_drains() {
        let sink = RecordingSink::<u32>::new();
        sink.emit(1).await;
        sink.emit(2).await;
        assert_eq!(sink.events().await, vec![1, 2]);
        assert_eq!(sink.take().await, vec![1, 2]);
        assert!(sink.is_empty().await);
    }
}
