//! Main HTTP Gateway Router.
//!
//! Serves the health probe and the landing endpoints the gate redirects to,
//! with every route wrapped by the access gate. The actual application pages
//! live elsewhere and are merged in by the caller.

use axum::{extract::OriginalUri, http::StatusCode, routing::get, Extension, Json, Router};
use hireforge_core::Session;
use serde_json::{json, Value};
use std::time::Instant;

use crate::health_api;
use crate::middleware::{gate_router, GateState};

/// State for the bundled routes.
#[derive(Clone)]
pub struct ServerState {
    pub started_at: Instant,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

/// Build the gated router. `app` carries the application's own routes and
/// must not set its own fallback.
pub fn build_router(gate: GateState, app: Router) -> Router {
    let login_path = gate.gate.policy().login_path().to_string();
    let unauthorized_path = gate.gate.policy().unauthorized_location().to_string();

    let bundled = Router::new()
        .route("/api/health", get(health_api::get_health))
        .route(&login_path, get(login_landing))
        .route(&unauthorized_path, get(unauthorized_landing))
        .fallback(not_found)
        .with_state(ServerState::default());

    gate_router(bundled.merge(app), gate)
}

async fn login_landing() -> &'static str {
    "Sign in to continue."
}

async fn unauthorized_landing() -> &'static str {
    "Your role does not have access to this area."
}

/// Unrouted paths. Reached only after the gate let the request through, so
/// the session (if any) is echoed back.
async fn not_found(
    OriginalUri(uri): OriginalUri,
    session: Option<Extension<Session>>,
) -> (StatusCode, Json<Value>) {
    let (user_id, role) = session
        .map(|Extension(s)| (Some(s.user_id), Some(s.role)))
        .unwrap_or((None, None));
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not found",
            "path": uri.path(),
            "userId": user_id,
            "role": role,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use hireforge_config::HireForgeConfig;
    use hireforge_core::Role;
    use tower::ServiceExt;

    async fn router() -> (Router, crate::session::SessionStore) {
        let (gate, store) = GateState::from_config(&HireForgeConfig::default()).await.unwrap();
        (build_router(gate, Router::new()), store)
    }

    async fn json_body(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _) = router().await;
        let resp = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "hireforge");
    }

    #[tokio::test]
    async fn redirect_targets_are_reachable_anonymously() {
        let (app, _) = router().await;
        for path in ["/login", "/unauthorized"] {
            let resp = app
                .clone()
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn unrouted_admin_path_passes_gate_then_404s() {
        let (app, store) = router().await;
        let token = store.issue("u-42", Role::DepartmentHead).await;
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/admin/dashboard")
                    .header(header::COOKIE, format!("hireforge_session={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = json_body(resp).await;
        assert_eq!(body["path"], "/admin/dashboard");
        assert_eq!(body["userId"], "u-42");
        assert_eq!(body["role"], "DEPARTMENT_HEAD");
    }

    #[tokio::test]
    async fn merged_application_routes_are_gated() {
        let (gate, _) = GateState::from_config(&HireForgeConfig::default()).await.unwrap();
        let app = Router::new().route("/admin/jobs", get(|| async { "jobs" }));
        let resp = build_router(gate, app)
            .oneshot(Request::builder().uri("/admin/jobs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    }
}
