/// Listener trait and registry.
///
/// Listeners observe subcommand lifecycle events. Several listeners can be
/// registered per event kind; they run sequentially in registration order.
/// A failing listener is logged and never stops the others.
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use switchyard_core::{EventKind, EventSink, SubcommandEvent};

// ---------------------------------------------------------------------------
// Listener trait
// ---------------------------------------------------------------------------

/// Something that reacts to a lifecycle event.
#[async_trait]
pub trait Listener: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    async fn on_event(&self, event: &SubcommandEvent) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

type ListenerBox = Arc<dyn Listener>;
type KindMap = HashMap<EventKind, Vec<ListenerBox>>;

const ALL_KINDS: [EventKind; 5] = [
    EventKind::Run,
    EventKind::Success,
    EventKind::Denied,
    EventKind::Error,
    EventKind::HandlerMissing,
];

/// Thread-safe registry of listeners organized by event kind. Usable directly
/// as the dispatcher's event sink.
#[derive(Default, Clone)]
pub struct ListenerRegistry {
    listeners: Arc<RwLock<KindMap>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind.
    pub async fn register(&self, kind: EventKind, listener: Arc<dyn Listener>) {
        let mut map = self.listeners.write().await;
        map.entry(kind).or_default().push(listener);
    }

    /// Register a listener for every event kind.
    pub async fn register_all(&self, listener: Arc<dyn Listener>) {
        let mut map = self.listeners.write().await;
        for kind in ALL_KINDS {
            map.entry(kind).or_default().push(Arc::clone(&listener));
        }
    }

    pub async fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.read().await.get(&kind).map_or(0, Vec::len)
    }

    /// Deliver the event to every listener registered for its kind.
    pub async fn notify(&self, event: &SubcommandEvent) {
        let kind = event.kind();
        // The lock is released before any listener runs.
        let chain = match self.listeners.read().await.get(&kind) {
            Some(chain) => chain.clone(),
            None => return,
        };

        for listener in &chain {
            debug!("[Listeners] Running {} for {}", listener.name(), event.name());
            if let Err(e) = listener.on_event(event).await {
                warn!("[Listeners] {} returned error: {}", listener.name(), e);
            }
        }
    }
}

#[async_trait]
impl EventSink<SubcommandEvent> for ListenerRegistry {
    async fn emit(&self, event: SubcommandEvent) {
        self.notify(&event).await;
    }
}
