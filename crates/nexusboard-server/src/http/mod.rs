//! HTTP server for the board service.
//!
//! Provides endpoints for:
//! - Project CRUD and sharing (`/v1/projects`)
//! - Board listing per project (`/v1/projects/{id}/tasks`)
//! - Task quick-add, save, drag-drop move, delete (`/v1/tasks`)
//! - Board statistics (`/v1/projects/{id}/stats`)
//! - Health check (`/health`)
//! - Prometheus metrics (`/metrics`)

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer for the board frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Project routes
        .route(
            "/v1/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route("/v1/projects/:id/share", post(handlers::share_project))
        .route("/v1/projects/:id/tasks", get(handlers::list_board))
        .route("/v1/projects/:id/stats", get(handlers::project_stats))
        // Task routes
        .route("/v1/tasks", post(handlers::quick_add))
        .route(
            "/v1/tasks/:id",
            put(handlers::save_task).delete(handlers::delete_task),
        )
        .route("/v1/tasks/:id/move", post(handlers::move_task))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::responses::{AutomatedTaskResponse, BoardResponse, ErrorResponse, StatsResponse};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use nexusboard_core::{Project, ProjectId, Status, Task, TaskId, MANDATORY_QA_ITEMS};

    async fn seeded() -> (Router, Arc<AppState>) {
        let state = AppState::new();
        let project = Project::new("Platform", "ana").with_id(ProjectId::new("proj-1"));
        state
            .projects
            .write()
            .await
            .insert(project.id.clone(), project);
        (create_router(state.clone()), state)
    }

    async fn seed_task(state: &Arc<AppState>, id: &str, status: Status, pos: f64) {
        let task = Task::new(ProjectId::new("proj-1"), id)
            .with_id(TaskId::new(id))
            .with_status(status)
            .with_position(pos);
        state.tasks.write().await.insert(task.id.clone(), task);
    }

    fn post_json(uri: &str, role: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-role", role)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_quick_add_chains_positions() {
        let (router, _state) = seeded().await;

        let body = json!({ "project_id": "proj-1", "title": "first", "status": "todo" });
        let response = router
            .clone()
            .oneshot(post_json("/v1/tasks", "editor", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let first: Task = read_json(response).await;
        assert_eq!(first.position, Some(1000.0));

        let body = json!({ "project_id": "proj-1", "title": "second", "status": "todo" });
        let response = router
            .clone()
            .oneshot(post_json("/v1/tasks", "editor", body))
            .await
            .unwrap();
        let second: Task = read_json(response).await;
        assert_eq!(second.position, Some(2000.0));
    }

    #[tokio::test]
    async fn test_viewer_cannot_add_tasks() {
        let (router, _state) = seeded().await;

        let body = json!({ "project_id": "proj-1", "title": "nope" });
        let response = router
            .oneshot(post_json("/v1/tasks", "viewer", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let err: ErrorResponse = read_json(response).await;
        assert_eq!(err.error, "Role 'viewer' is not allowed to add tasks");
    }

    #[tokio::test]
    async fn test_project_stats_endpoint() {
        let (router, state) = seeded().await;
        seed_task(&state, "done-1", Status::Done, 1000.0).await;
        seed_task(&state, "slow", Status::InProgress, 1000.0).await;
        {
            let mut tasks = state.tasks.write().await;
            tasks.get_mut(&TaskId::new("done-1")).unwrap().progress = 100;
            tasks.get_mut(&TaskId::new("slow")).unwrap().progress = 10;
        }

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/v1/projects/proj-1/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stats: StatsResponse = read_json(response).await;
        assert_eq!(stats.stats.total, 2);
        assert_eq!(stats.stats.completion_rate, 50);
        assert_eq!(stats.stalled, vec!["slow".to_string()]);
    }

    #[tokio::test]
    async fn test_drop_to_done_is_redirected_by_qa_gate() {
        let (router, state) = seeded().await;
        seed_task(&state, "dragged", Status::InProgress, 1000.0).await;
        state
            .tasks
            .write()
            .await
            .get_mut(&TaskId::new("dragged"))
            .unwrap()
            .progress = 100;
        seed_task(&state, "done-anchor", Status::Done, 1000.0).await;
        seed_task(&state, "in-review", Status::Review, 1000.0).await;

        // Drop before the anchor in Done; the QA gate sends the card to
        // Review instead, so the anchor is ignored and the card appends
        // after the existing Review task.
        let body = json!({ "status": "done", "anchor": "done-anchor", "side": "before" });
        let response = router
            .oneshot(post_json("/v1/tasks/dragged/move", "editor", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let moved: AutomatedTaskResponse = read_json(response).await;
        assert_eq!(moved.task.status, Status::Review);
        assert_eq!(moved.task.position, Some(2000.0));
        assert_eq!(
            moved.rule.as_deref(),
            Some("QA Block: mandatory checklist generated.")
        );
        assert_eq!(moved.task.checklist.len(), MANDATORY_QA_ITEMS.len());
        assert!(moved.task.checklist.iter().all(|i| !i.checked));
    }

    #[tokio::test]
    async fn test_drop_zero_progress_card_lands_in_todo() {
        let (router, state) = seeded().await;
        seed_task(&state, "fresh", Status::InProgress, 1000.0).await;

        let body = json!({ "status": "inprogress" });
        let response = router
            .oneshot(post_json("/v1/tasks/fresh/move", "editor", body))
            .await
            .unwrap();

        let moved: AutomatedTaskResponse = read_json(response).await;
        assert_eq!(moved.task.status, Status::Todo);
        assert_eq!(moved.rule.as_deref(), Some("0% → Not Started"));
    }

    #[tokio::test]
    async fn test_move_before_anchor_takes_midpoint() {
        let (router, state) = seeded().await;
        seed_task(&state, "a", Status::Todo, 1000.0).await;
        seed_task(&state, "b", Status::Todo, 2000.0).await;
        seed_task(&state, "c", Status::Backlog, 1000.0).await;

        let body = json!({ "status": "todo", "anchor": "b", "side": "before" });
        let response = router
            .clone()
            .oneshot(post_json("/v1/tasks/c/move", "editor", body))
            .await
            .unwrap();

        let moved: AutomatedTaskResponse = read_json(response).await;
        assert_eq!(moved.task.status, Status::Todo);
        assert_eq!(moved.task.position, Some(1500.0));
        assert_eq!(moved.rule, None);

        // The board now lists the Todo column in manual order.
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/v1/projects/proj-1/tasks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let board: BoardResponse = read_json(response).await;
        let todo = board
            .columns
            .iter()
            .find(|c| c.status == Status::Todo)
            .unwrap();
        let ids: Vec<&str> = todo.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }
}
