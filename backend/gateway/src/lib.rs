//! HireForge Gateway
//!
//! The route authorization gate and the HTTP surface around it: session
//! resolution, the axum middleware, and the server that hosts them.

pub mod error;
pub mod gate;
pub mod health_api;
pub mod middleware;
pub mod server;
pub mod session;

pub use error::GateError;
pub use gate::{AccessGate, AccessPolicy, Decision};
pub use middleware::{access_gate_middleware, gate_router, GateState};
pub use server::{build_router, ServerState};
pub use session::{extract_token, SessionResolver, SessionStore};
