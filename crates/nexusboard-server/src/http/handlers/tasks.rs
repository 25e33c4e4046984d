//! Task handlers: board listing, quick-add, save, drag-drop move,
//! deletion.
//!
//! Save and move run the automation engine before the task is stored,
//! and move allocates a fresh fractional position. When automation
//! redirects a drop to a different column than the one the user aimed
//! at, the drop anchor is discarded and the card appends to the end of
//! the automated column.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use nexusboard_core::{
    allocate_position, append_position, apply_automation, column_order, CoreError, DropTarget,
    Permission, ProjectId, Side, Status, Task, TaskId,
};

use crate::http::handlers::{forbidden, not_found, role_from_headers};
use crate::http::responses::{
    AutomatedTaskResponse, BoardResponse, ColumnResponse, MoveTaskRequest, QuickAddRequest,
};
use crate::state::AppState;

/// Tasks of one column, sorted in manual order.
fn column_tasks<'a, I>(tasks: I, project_id: &ProjectId, status: Status) -> Vec<Task>
where
    I: Iterator<Item = &'a Task>,
{
    let mut column: Vec<Task> = tasks
        .filter(|t| &t.project_id == project_id && t.status == status)
        .cloned()
        .collect();
    column.sort_by(column_order);
    column
}

/// Board listing: every column of a project in board order.
pub async fn list_board(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let project_id = ProjectId::new(id.clone());
    if !state.projects.read().await.contains_key(&project_id) {
        return not_found(CoreError::ProjectNotFound(id));
    }

    let tasks = state.tasks.read().await;
    let columns = Status::ALL
        .iter()
        .map(|status| ColumnResponse {
            status: *status,
            label: status.label().to_string(),
            tasks: column_tasks(tasks.values(), &project_id, *status),
        })
        .collect();

    Json(BoardResponse { columns }).into_response()
}

/// Quick-add: a bare title dropped at the end of a column.
pub async fn quick_add(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<QuickAddRequest>,
) -> impl IntoResponse {
    let role = role_from_headers(&headers);
    if !role.allows(Permission::Edit) {
        return forbidden(role, "add tasks");
    }

    let project_id = ProjectId::new(req.project_id.clone());
    if !state.projects.read().await.contains_key(&project_id) {
        return not_found(CoreError::ProjectNotFound(req.project_id));
    }

    let mut tasks = state.tasks.write().await;
    let column = column_tasks(tasks.values(), &project_id, req.status);
    let position = append_position(&column);

    let task = Task::new(project_id, req.title)
        .with_status(req.status)
        .with_position(position);
    tasks.insert(task.id.clone(), task.clone());
    info!(task = %task.id, status = %task.status, position, "Task created");

    (StatusCode::CREATED, Json(task)).into_response()
}

/// Save a full task edit. Automation runs before the task is stored;
/// the path id wins over whatever id the body carries. The manual
/// position is left untouched - only drag-drop reorders.
pub async fn save_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(mut task): Json<Task>,
) -> impl IntoResponse {
    let role = role_from_headers(&headers);
    if !role.allows(Permission::Edit) {
        return forbidden(role, "edit tasks");
    }

    task.id = TaskId::new(id);
    let outcome = apply_automation(&task);

    let mut tasks = state.tasks.write().await;
    tasks.insert(outcome.task.id.clone(), outcome.task.clone());

    let rule = outcome.rule.map(|r| r.description().to_string());
    if let Some(rule) = &rule {
        info!(task = %outcome.task.id, rule, "Automation rule fired on save");
    }

    Json(AutomatedTaskResponse {
        task: outcome.task,
        rule,
    })
    .into_response()
}

/// Drag-drop move: run automation against the drop column, then place
/// the card in whichever column automation settled on.
pub async fn move_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<MoveTaskRequest>,
) -> impl IntoResponse {
    let role = role_from_headers(&headers);
    if !role.allows(Permission::Move) {
        return forbidden(role, "move tasks");
    }

    let mut tasks = state.tasks.write().await;
    let task_id = TaskId::new(id.clone());
    let Some(dragged) = tasks.get(&task_id).cloned() else {
        return not_found(CoreError::TaskNotFound(id));
    };

    // Automation sees the card as if the drop had landed.
    let outcome = apply_automation(&dragged.clone().with_status(req.status));
    let final_status = outcome.task.status;

    let siblings = column_tasks(
        tasks.values().filter(|t| t.id != task_id),
        &dragged.project_id,
        final_status,
    );

    // The drop anchor only holds if automation kept the card in the
    // column the user aimed at; otherwise append to the automated one.
    let target = match req.anchor {
        Some(anchor) if final_status == req.status => DropTarget::Relative {
            anchor: TaskId::new(anchor),
            side: req.side.unwrap_or(Side::After),
        },
        _ => DropTarget::AfterLast,
    };
    let position = allocate_position(&siblings, &target);

    let mut stored = outcome.task;
    stored.position = Some(position);
    tasks.insert(stored.id.clone(), stored.clone());

    let rule = outcome.rule.map(|r| r.description().to_string());
    info!(
        task = %stored.id,
        status = %stored.status,
        position,
        rule = rule.as_deref().unwrap_or("-"),
        "Task moved"
    );

    Json(AutomatedTaskResponse { task: stored, rule }).into_response()
}

/// Delete a task. Admins only.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let role = role_from_headers(&headers);
    if !role.allows(Permission::Delete) {
        return forbidden(role, "delete tasks");
    }

    let mut tasks = state.tasks.write().await;
    let task_id = TaskId::new(id.clone());
    if tasks.remove(&task_id).is_none() {
        return not_found(CoreError::TaskNotFound(id));
    }
    info!(task = %task_id, "Task deleted");

    StatusCode::NO_CONTENT.into_response()
}
