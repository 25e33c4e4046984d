//! Board statistics for the metrics header and monitoring dashboard.

use serde::{Deserialize, Serialize};

use crate::{Priority, Status, Task};

/// Progress threshold below which an in-progress task counts as stalled.
const STALLED_PROGRESS_CEILING: u8 = 25;

/// Aggregate counters over one project's tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardStats {
    /// Total number of tasks.
    pub total: usize,

    /// Tasks per column, in board order.
    pub by_status: [usize; 5],

    /// Done tasks as a rounded percentage of the total (0 when empty).
    pub completion_rate: u8,

    /// Mean progress of active (In Progress + Review) tasks; 0 when
    /// there are none.
    pub velocity: u8,

    /// Tasks per priority: low, medium, high.
    pub by_priority: [usize; 3],
}

impl BoardStats {
    /// Compute statistics over a task slice.
    pub fn compute(tasks: &[Task]) -> Self {
        let total = tasks.len();

        let mut by_status = [0usize; 5];
        let mut by_priority = [0usize; 3];
        for task in tasks {
            let column = Status::ALL
                .iter()
                .position(|s| *s == task.status)
                .unwrap_or(0);
            by_status[column] += 1;
            let bucket = match task.priority {
                Priority::Low => 0,
                Priority::Medium => 1,
                Priority::High => 2,
            };
            by_priority[bucket] += 1;
        }

        let done = tasks.iter().filter(|t| t.status.is_done()).count();
        let completion_rate = if total == 0 {
            0
        } else {
            ((done as f64 / total as f64) * 100.0).round() as u8
        };

        let active: Vec<&Task> = tasks
            .iter()
            .filter(|t| matches!(t.status, Status::InProgress | Status::Review))
            .collect();
        let velocity = if active.is_empty() {
            0
        } else {
            let sum: u32 = active.iter().map(|t| u32::from(t.progress)).sum();
            (sum as f64 / active.len() as f64).round() as u8
        };

        Self {
            total,
            by_status,
            completion_rate,
            velocity,
            by_priority,
        }
    }

    /// Count for one column.
    pub fn count(&self, status: Status) -> usize {
        let column = Status::ALL
            .iter()
            .position(|s| *s == status)
            .unwrap_or(0);
        self.by_status[column]
    }
}

/// Tasks sitting in In Progress with barely any progress - the
/// stagnation-risk signal surfaced on the monitoring dashboard.
pub fn find_stalled(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.status == Status::InProgress && t.progress < STALLED_PROGRESS_CEILING)
        .collect()
}
