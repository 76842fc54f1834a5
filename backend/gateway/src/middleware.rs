//! Axum middleware wiring the gate into the request pipeline.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Router;
use hireforge_config::HireForgeConfig;
use hireforge_core::{Role, Session};
use hireforge_security::PermissionRegistry;
use logging::{redact_sensitive_data, AccessEvent, AccessOutcome};
use tracing::{info, warn};

use crate::error::GateError;
use crate::gate::{AccessGate, AccessPolicy, Decision};
use crate::session::{SessionResolver, SessionStore};

/// What the middleware needs: the gate and a way to find the caller's session.
#[derive(Clone)]
pub struct GateState {
    pub gate: AccessGate,
    pub resolver: Arc<dyn SessionResolver>,
}

impl GateState {
    pub fn new(gate: AccessGate, resolver: Arc<dyn SessionResolver>) -> Self {
        Self { gate, resolver }
    }

    /// Build the gate and an in-memory session store from a prepared config.
    ///
    /// The store is returned alongside so callers can issue or revoke
    /// sessions; it is also the state's resolver.
    pub async fn from_config(config: &HireForgeConfig) -> Result<(Self, SessionStore), GateError> {
        let registry = PermissionRegistry::with_overrides(&config.role_overrides()?);
        let policy = AccessPolicy::from_config(config)?;
        let store = SessionStore::new(config.session_cookie(), config.session_ttl_minutes());

        for seed in config.seed_sessions() {
            let role = Role::parse(&seed.role);
            store
                .insert(seed.token.clone(), Session::new(seed.user_id.clone(), role))
                .await;
        }
        info!(
            rules = policy.rules().len(),
            seeded = config.seed_sessions().len(),
            "Access gate configured"
        );

        let state = Self::new(AccessGate::new(policy, registry), Arc::new(store.clone()));
        Ok((state, store))
    }
}

impl Decision {
    /// The redirect to send, or `None` when the request should proceed.
    pub fn redirect_response(&self) -> Option<Response> {
        self.location()
            .map(|location| Redirect::temporary(location).into_response())
    }

    fn outcome(&self) -> AccessOutcome {
        match self {
            Decision::Allow => AccessOutcome::Allowed,
            Decision::RedirectLogin { .. } => AccessOutcome::RedirectLogin,
            Decision::RedirectUnauthorized { .. } => AccessOutcome::RedirectUnauthorized,
        }
    }
}

/// Route authorization middleware.
///
/// Public paths pass straight through without a session lookup. On
/// protected paths the session is resolved, the gate decides, and an
/// allowed request carries the `Session` as an extension for handlers.
/// A failing session backend counts as "no session".
pub async fn access_gate_middleware(
    State(state): State<GateState>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let Some(rule) = state.gate.policy().protected_rule(&path) else {
        AccessEvent::new(&path, AccessOutcome::Public).emit();
        return next.run(req).await;
    };
    let capability = rule.capability.clone();

    let session = match state.resolver.resolve(req.headers()).await {
        Ok(session) => session,
        Err(e) => {
            warn!(
                path = %path,
                error = %redact_sensitive_data(&e.to_string()),
                "Session lookup failed; treating request as unauthenticated"
            );
            None
        }
    };

    let decision = state.gate.decide(&path, session.as_ref());

    let mut event =
        AccessEvent::new(&path, decision.outcome()).with_capability(capability.as_str());
    if let Some(s) = &session {
        event = event.with_subject(&s.user_id, s.role.as_str());
    }
    event.emit();

    if let Some(redirect) = decision.redirect_response() {
        return redirect;
    }
    if let Some(session) = session {
        req.extensions_mut().insert(session);
    }
    next.run(req).await
}

/// Wrap every route of `router` (fallback included) with the gate.
pub fn gate_router(router: Router, state: GateState) -> Router {
    router.layer(middleware::from_fn_with_state(state, access_gate_middleware))
}
