//! Shared application state.
//!
//! The board lives in memory behind `RwLock`s; durable persistence is a
//! separate backend concern. Every mutation holds the task-map write
//! lock for its whole read-modify-write, so position allocation always
//! sees a consistent column snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use nexusboard_core::{Project, ProjectId, Task, TaskId};

/// Shared application state.
#[derive(Default)]
pub struct AppState {
    /// Projects indexed by ProjectId.
    pub projects: RwLock<HashMap<ProjectId, Project>>,

    /// Tasks indexed by TaskId.
    pub tasks: RwLock<HashMap<TaskId, Task>>,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get the number of projects.
    #[allow(dead_code)]
    pub async fn project_count(&self) -> usize {
        self.projects.read().await.len()
    }

    /// Get the number of tasks.
    #[allow(dead_code)]
    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }
}
