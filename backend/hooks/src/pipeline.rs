/// Sink pipeline.
///
/// Wraps several sinks behind one so the dispatcher can feed a listener
/// registry, a logger and a bus at once. Sinks receive each event in the
/// order they were added.
use std::sync::Arc;

use async_trait::async_trait;

use switchyard_core::EventSink;

pub struct SinkPipeline<E: Send + 'static> {
    sinks: Vec<Arc<dyn EventSink<E>>>,
}

impl<E: Send + 'static> Default for SinkPipeline<E> {
    fn default() -> Self {
        Self { sinks: Vec::new() }
    }
}

impl<E> SinkPipeline<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn EventSink<E>>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl<E> EventSink<E> for SinkPipeline<E>
where
    E: Clone + Send + Sync + 'static,
{
    async fn emit(&self, event: E) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}
