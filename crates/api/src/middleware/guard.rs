//! Per-route resource guard.
//!
//! Unlike the request-level gate, the guard checks a single named resource's
//! own flag and ignores the hierarchy. An inactive resource either redirects
//! the caller (with a `flash_warning` cookie) or answers 404. Staff and admins
//! pass unless `RESOURCE_GATE_BYPASS_ELEVATED` is off.
//!
//! ```ignore
//! let sales = Router::new()
//!     .route("/sales", get(list_sales))
//!     .route_layer(from_fn_with_state(
//!         ResourceGuard::new(state.clone(), MARKETPLACE_RESOURCE),
//!         require_resource,
//!     ));
//! ```

use axum::extract::{Request, State};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::auth::{optional_principal, AuthUser};
use super::resource_gate::not_found_page;
use crate::state::AppState;

/// Cookie read by the page layer to show a one-off warning.
pub const FLASH_COOKIE: &str = "flash_warning";
/// Cookie value meaning "the resource you tried is switched off".
pub const FLASH_RESOURCE_UNAVAILABLE: &str = "resource_unavailable";

const UNAVAILABLE_MESSAGE: &str =
    "This resource is temporarily unavailable. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnInactive {
    /// 303 to the given location.
    Redirect(String),
    /// 404 page.
    Deny,
}

/// Configuration for [`require_resource`].
#[derive(Clone)]
pub struct ResourceGuard {
    state: AppState,
    resource: &'static str,
    on_inactive: OnInactive,
    show_message: bool,
}

impl ResourceGuard {
    /// Guard `resource`, redirecting to the dashboard when it is off.
    pub fn new(state: AppState, resource: &'static str) -> Self {
        let dashboard = state.config.gate.dashboard_path.clone();
        Self {
            state,
            resource,
            on_inactive: OnInactive::Redirect(dashboard),
            show_message: true,
        }
    }

    pub fn redirect_to(mut self, location: impl Into<String>) -> Self {
        self.on_inactive = OnInactive::Redirect(location.into());
        self
    }

    pub fn deny(mut self) -> Self {
        self.on_inactive = OnInactive::Deny;
        self
    }

    /// Do not attach the warning.
    pub fn silent(mut self) -> Self {
        self.show_message = false;
        self
    }
}

/// Route-layer middleware enforcing a [`ResourceGuard`].
pub async fn require_resource(
    State(guard): State<ResourceGuard>,
    request: Request,
    next: Next,
) -> Response {
    let state = &guard.state;
    let elevated = optional_principal(request.headers(), &state.config.jwt)
        .as_ref()
        .is_some_and(AuthUser::is_elevated);
    if elevated && state.config.gate.bypass_elevated {
        return next.run(request).await;
    }

    let active = match state.gate.is_active(guard.resource).await {
        Ok(active) => active,
        Err(e) => {
            tracing::error!(resource = guard.resource, error = %e, "Resource check failed, allowing request");
            true
        }
    };
    if active {
        return next.run(request).await;
    }

    tracing::info!(
        resource = guard.resource,
        path = %request.uri().path(),
        "Guarded route hit while resource inactive"
    );

    match &guard.on_inactive {
        OnInactive::Redirect(location) => {
            let mut response = (StatusCode::SEE_OTHER, [(LOCATION, location.as_str())]).into_response();
            if guard.show_message {
                let cookie = format!(
                    "{FLASH_COOKIE}={FLASH_RESOURCE_UNAVAILABLE}; Path=/; Max-Age=60; SameSite=Lax"
                );
                if let Ok(value) = cookie.parse::<HeaderValue>() {
                    response.headers_mut().append(SET_COOKIE, value);
                }
            }
            response
        }
        OnInactive::Deny => {
            let message = guard.show_message.then_some(UNAVAILABLE_MESSAGE);
            not_found_page(&state.config.gate, elevated, message).await
        }
    }
}
