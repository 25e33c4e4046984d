//! Board statistics and metrics handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use nexusboard_core::{find_stalled, BoardStats, CoreError, ProjectId, Task};

use crate::http::handlers::not_found;
use crate::http::responses::StatsResponse;
use crate::metrics::collect_metrics;
use crate::state::AppState;

/// Board statistics for one project: the monitoring-dashboard numbers.
pub async fn project_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let project_id = ProjectId::new(id.clone());
    if !state.projects.read().await.contains_key(&project_id) {
        return not_found(CoreError::ProjectNotFound(id));
    }

    let tasks = state.tasks.read().await;
    let project_tasks: Vec<Task> = tasks
        .values()
        .filter(|t| t.project_id == project_id)
        .cloned()
        .collect();

    let stats = BoardStats::compute(&project_tasks);
    let stalled = find_stalled(&project_tasks)
        .into_iter()
        .map(|t| t.id.to_string())
        .collect();

    Json(StatsResponse { stats, stalled }).into_response()
}

/// Prometheus metrics endpoint.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    collect_metrics(&state).await
}
