//! Telemetry and structured logging for Switchyard.
//!
//! Handles log redaction, JSON output, file rotation, and lifecycle event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventDetail, EventLogEntry, EventLogger, EVENT_TARGET};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
