//! Prometheus metrics collection and formatting.
//!
//! This module provides metrics in Prometheus text exposition format.

use std::fmt::Write;
use std::sync::Arc;

use nexusboard_core::Status;

use crate::state::AppState;

/// Collect all metrics from AppState and format as Prometheus text.
pub async fn collect_metrics(state: &Arc<AppState>) -> String {
    let mut output = String::new();

    collect_task_metrics(state, &mut output).await;
    collect_project_metrics(state, &mut output).await;

    output
}

/// Collect task metrics by status column.
async fn collect_task_metrics(state: &Arc<AppState>, output: &mut String) {
    let tasks = state.tasks.read().await;

    let mut counts = [0u64; 5];
    for task in tasks.values() {
        if let Some(column) = Status::ALL.iter().position(|s| *s == task.status) {
            counts[column] += 1;
        }
    }

    writeln!(
        output,
        "# HELP nexusboard_tasks_total Total number of tasks by status column"
    )
    .ok();
    writeln!(output, "# TYPE nexusboard_tasks_total gauge").ok();
    for (status, count) in Status::ALL.iter().zip(counts) {
        writeln!(
            output,
            "nexusboard_tasks_total{{status=\"{status}\"}} {count}"
        )
        .ok();
    }
}

/// Collect project metrics.
async fn collect_project_metrics(state: &Arc<AppState>, output: &mut String) {
    let projects = state.projects.read().await;

    writeln!(output).ok();
    writeln!(output, "# HELP nexusboard_projects_total Number of projects").ok();
    writeln!(output, "# TYPE nexusboard_projects_total gauge").ok();
    writeln!(output, "nexusboard_projects_total {}", projects.len()).ok();
}
