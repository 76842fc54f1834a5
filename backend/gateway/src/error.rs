use thiserror::Error;

/// Faults inside the gateway. None of these reach the client directly:
/// a session lookup failure is logged and the request is treated as
/// unauthenticated.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("session lookup failed: {0}")]
    SessionLookup(String),

    #[error(transparent)]
    Core(#[from] hireforge_core::HireError),
}
