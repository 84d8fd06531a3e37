//! Request-level resource gate.
//!
//! Every request path is resolved against the gate's route table. Paths gated
//! by an effectively inactive resource get a 404 HTML page; everything else
//! passes through untouched.

use std::path::Path;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};

use super::auth::{optional_principal, AuthUser};
use crate::config::GateSettings;
use crate::gate::GateDecision;
use crate::state::AppState;

/// Page shown to `admin`/`staff` callers.
const ELEVATED_TEMPLATE: &str = "resources/404.html";
/// Page shown to everyone else.
const PUBLIC_TEMPLATE: &str = "errors/404.html";

/// Axum middleware applying the gate to every request.
///
/// Mount with `axum::middleware::from_fn_with_state(state, resource_gate)`.
pub async fn resource_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let elevated = optional_principal(request.headers(), &state.config.jwt)
        .as_ref()
        .is_some_and(AuthUser::is_elevated);
    if elevated && state.config.gate.bypass_elevated {
        return next.run(request).await;
    }

    let path = request.uri().path().to_owned();
    match state.gate.check_path(&path).await {
        GateDecision::Blocked { resource } => {
            tracing::warn!(path, resource, "Inactive resource requested");
            not_found_page(&state.config.gate, elevated, None).await
        }
        GateDecision::Allowed { .. } | GateDecision::Unmapped => next.run(request).await,
    }
}

/// Render the 404 page for a blocked resource.
///
/// The page comes from the templates directory. If it cannot be read, a
/// minimal inline page is served instead.
pub async fn not_found_page(settings: &GateSettings, elevated: bool, message: Option<&str>) -> Response {
    let template = if elevated {
        ELEVATED_TEMPLATE
    } else {
        PUBLIC_TEMPLATE
    };

    let body = match load_template(&settings.templates_dir, template).await {
        Ok(raw) => raw
            .replace("{{ dashboard_url }}", &settings.dashboard_path)
            .replace("{{ message }}", message.unwrap_or_default()),
        Err(e) => {
            tracing::error!(template, error = %e, "Failed to load 404 template");
            fallback_page(elevated, &settings.dashboard_path, message)
        }
    };

    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

async fn load_template(dir: &Path, name: &str) -> std::io::Result<String> {
    tokio::fs::read_to_string(dir.join(name)).await
}

fn fallback_page(elevated: bool, dashboard_url: &str, message: Option<&str>) -> String {
    let (title, detail) = if elevated {
        (
            "404 - Resource Unavailable",
            "This resource is temporarily unavailable.",
        )
    } else {
        (
            "404 - Page Not Found",
            "The page you are looking for does not exist or has been moved.",
        )
    };
    let message = message
        .map(|m| format!("<p>{m}</p>"))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html><html><head><title>Error</title></head>\
         <body style=\"font-family: Arial; text-align:center; padding:50px;\">\
         <h1 style=\"color: #dc3545;\">{title}</h1><p>{detail}</p>{message}\
         <p><a href=\"{dashboard_url}\">Back to Dashboard</a></p>\
         </body></html>"
    )
}
