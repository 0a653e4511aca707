pub mod builtin;
pub mod bus;
pub mod pipeline;
pub mod recording;
pub mod registry;

pub use builtin::{CountingListener, LoggingListener};
pub use bus::BroadcastSink;
pub use pipeline::SinkPipeline;
pub use recording::RecordingSink;
pub use registry::{Listener, ListenerRegistry};
