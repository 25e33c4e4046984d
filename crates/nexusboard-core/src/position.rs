//! Fractional position allocation for manual column ordering.
//!
//! Positions are real numbers; inserting between two neighbors takes the
//! midpoint of their positions, so a reorder never renumbers the rest of
//! the column. Appends jump by a large fixed increment to leave room for
//! many midpoint insertions before float precision runs out - an
//! accepted tradeoff of the scheme, not something the allocator detects.
//!
//! The allocator is pure: it reads an ordered sibling snapshot and
//! returns one new position. Sorting the snapshot and persisting the
//! result are the caller's job.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Task, TaskId};

/// Gap between appended positions.
pub const INCREMENT: f64 = 1000.0;

/// Which side of the anchor task a card was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Before,
    After,
}

/// Where in the column the new position should land.
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    /// Append after the last sibling (quick-add, drop on empty space).
    AfterLast,
    /// Drop relative to a specific sibling.
    Relative { anchor: TaskId, side: Side },
}

/// Column ordering: position ascending, with the RFC 3339 rendering of
/// `created_at` as tie-break. The string comparison (rather than the
/// timestamp itself) matches the ordering the board has always used.
pub fn column_order(a: &Task, b: &Task) -> Ordering {
    match a.position_or_zero().partial_cmp(&b.position_or_zero()) {
        Some(Ordering::Equal) | None => a
            .created_at
            .to_rfc3339()
            .cmp(&b.created_at.to_rfc3339()),
        Some(ordering) => ordering,
    }
}

/// Compute a position for a task entering a column.
///
/// `siblings` must already be sorted by [`column_order`] and must not
/// contain the moving task itself. A `Relative` target whose anchor is
/// not in `siblings` (a stale drag reference) degrades to a plain
/// `INCREMENT` rather than failing the drop.
pub fn allocate_position(siblings: &[Task], target: &DropTarget) -> f64 {
    match target {
        DropTarget::AfterLast => append_position(siblings),
        DropTarget::Relative { anchor, side } => {
            let Some(index) = siblings.iter().position(|t| &t.id == anchor) else {
                return INCREMENT;
            };
            let anchor_pos = siblings[index].position_or_zero();

            match side {
                Side::Before => {
                    // Halve the gap to the previous sibling, or to zero
                    // when the anchor is first in the column.
                    match index.checked_sub(1).map(|i| &siblings[i]) {
                        Some(prev) => (prev.position_or_zero() + anchor_pos) / 2.0,
                        None => anchor_pos / 2.0,
                    }
                }
                Side::After => {
                    let next_pos = siblings
                        .get(index + 1)
                        .map(Task::position_or_zero)
                        .unwrap_or(anchor_pos + INCREMENT);
                    (anchor_pos + next_pos) / 2.0
                }
            }
        }
    }
}

/// Position for appending to the end of a column.
pub fn append_position(siblings: &[Task]) -> f64 {
    siblings
        .last()
        .map(|t| t.position_or_zero() + INCREMENT)
        .unwrap_or(INCREMENT)
}
