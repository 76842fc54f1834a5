//! `hireforge-core`: shared vocabulary of the HireForge access core.
//!
//! Roles, capability tokens and the session value the route gate reads.
//! Nothing in here performs I/O.

pub mod capability;
pub mod error;
pub mod role;
pub mod session;

pub use capability::Capability;
pub use error::HireError;
pub use role::Role;
pub use session::Session;
