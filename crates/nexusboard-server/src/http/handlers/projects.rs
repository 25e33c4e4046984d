//! Project handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use nexusboard_core::{CoreError, Permission, Project, ProjectId};

use crate::http::handlers::{forbidden, not_found, role_from_headers};
use crate::http::responses::{CreateProjectRequest, ShareProjectRequest};
use crate::state::AppState;

/// List all projects, sorted by name.
pub async fn list_projects(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let projects = state.projects.read().await;
    let mut listed: Vec<Project> = projects.values().cloned().collect();
    listed.sort_by(|a, b| a.name.cmp(&b.name));
    Json(listed)
}

/// Create a project.
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    let role = role_from_headers(&headers);
    if !role.allows(Permission::Edit) {
        return forbidden(role, "create projects");
    }

    let project = Project::new(req.name, req.owner);
    state
        .projects
        .write()
        .await
        .insert(project.id.clone(), project.clone());
    info!(project = %project.id, name = %project.name, "Project created");

    (StatusCode::CREATED, Json(project)).into_response()
}

/// Share a project with another member.
pub async fn share_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<ShareProjectRequest>,
) -> impl IntoResponse {
    let role = role_from_headers(&headers);
    if !role.allows(Permission::Edit) {
        return forbidden(role, "share projects");
    }

    let mut projects = state.projects.write().await;
    let Some(project) = projects.get_mut(&ProjectId::new(id.clone())) else {
        return not_found(CoreError::ProjectNotFound(id));
    };

    project.share_with(req.username.clone());
    info!(project = %project.id, username = %req.username, "Project shared");

    Json(project.clone()).into_response()
}
