//! HTTP handlers.

mod health;
mod projects;
mod stats;
mod tasks;

pub use health::health_check;
pub use projects::{create_project, list_projects, share_project};
pub use stats::{metrics_handler, project_stats};
pub use tasks::{delete_task, list_board, move_task, quick_add, save_task};

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use nexusboard_core::{CoreError, Role};

use crate::http::responses::ErrorResponse;

/// Resolve the acting role from the `x-role` header.
///
/// The header stands in for the session the (out of scope) auth layer
/// would establish; a missing or unparsable value falls back to the
/// default editor role.
pub(crate) fn role_from_headers(headers: &HeaderMap) -> Role {
    headers
        .get("x-role")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// 403 response for a role that lacks a permission.
pub(crate) fn forbidden(role: Role, action: &str) -> Response {
    warn!(role = %role, action, "Permission denied");
    let error = CoreError::PermissionDenied {
        role: role.to_string(),
        action: action.to_string(),
    };
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// 404 response for a missing resource.
pub(crate) fn not_found(error: CoreError) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}
