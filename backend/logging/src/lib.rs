//! Structured logging for HireForge.
//!
//! Console + rolling NDJSON file output, credential redaction, and the
//! access-decision event emitted by the route gate.

pub mod access_event;
pub mod logger;
pub mod redact;

pub use access_event::{AccessEvent, AccessOutcome};
pub use logger::{init_logger, LogSettings};
pub use redact::redact_sensitive_data;
