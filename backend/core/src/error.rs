use thiserror::Error;

/// Top-level error type for the HireForge access core.
///
/// Denied or unauthenticated requests are not errors; they are ordinary
/// gate decisions. This type only carries genuine faults.
#[derive(Debug, Error)]
pub enum HireError {
    #[error("invalid capability token '{0}': expected 'resource:action'")]
    InvalidCapability(String),

    #[error("unknown role '{0}'")]
    UnknownRole(String),
}
