//! Board automation engine.
//!
//! Pure rules applied to a task snapshot before every save or move:
//!
//! 1. Progress normalization - the progress percentage implies a column,
//!    and the task is moved there when they disagree. A 0% task already
//!    parked in Backlog is left alone.
//! 2. QA gate - a task may only sit in Done when every mandatory QA
//!    checklist item is present and checked; otherwise it is held in
//!    Review and any missing items are appended unchecked.
//!
//! The engine never touches storage or notifications: it returns the
//! corrected snapshot plus the rule that fired (at most one; the QA gate
//! supersedes progress normalization) and the caller persists/toasts.

use std::fmt;

use crate::{ChecklistItem, Status, Task};

/// Checklist items a task must carry, all checked, before it may rest in
/// the Done column. Matched by exact text equality.
pub const MANDATORY_QA_ITEMS: [&str; 3] = [
    "Description complete?",
    "Attachments present?",
    "Assignee validated?",
];

/// The rule an automation pass applied, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationRule {
    /// 0% progress moved the task back to To Do.
    ProgressZero,
    /// 1-60% progress moved the task to In Progress.
    ProgressActive,
    /// 61-99% progress moved the task to Review.
    ProgressNearDone,
    /// 100% progress moved the task to Done.
    ProgressComplete,
    /// Done was blocked: mandatory QA items were missing and have been
    /// appended to the checklist.
    QaChecklistGenerated,
    /// Done was blocked: mandatory QA items exist but are not all
    /// checked.
    QaVerificationIncomplete,
}

impl AutomationRule {
    /// Human-readable description, suitable for a notification toast.
    pub fn description(&self) -> &'static str {
        match self {
            AutomationRule::ProgressZero => "0% → Not Started",
            AutomationRule::ProgressActive => "1-60% → In Progress",
            AutomationRule::ProgressNearDone => "61-99% → Almost Done",
            AutomationRule::ProgressComplete => "100% → Done",
            AutomationRule::QaChecklistGenerated => {
                "QA Block: mandatory checklist generated."
            }
            AutomationRule::QaVerificationIncomplete => {
                "QA Block: complete verification."
            }
        }
    }
}

impl fmt::Display for AutomationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Result of an automation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AutomationOutcome {
    /// The corrected task snapshot.
    pub task: Task,

    /// The rule that fired, or `None` when the snapshot was already
    /// consistent.
    pub rule: Option<AutomationRule>,
}

/// Run the automation rules over a task snapshot.
///
/// Total over any input: progress above 100 is clamped to the boundary
/// instead of rejected. Idempotent: applying the engine to its own
/// output never mutates the task further.
pub fn apply_automation(task: &Task) -> AutomationOutcome {
    let mut updated = task.clone();
    let mut rule = None;

    // Rule 1: progress implies a column.
    let progress = updated.progress.min(100);
    let normalized = match progress {
        0 => {
            // Backlog is a deliberate parking spot, never auto-promoted.
            if updated.status != Status::Backlog && updated.status != Status::Todo {
                Some((Status::Todo, AutomationRule::ProgressZero))
            } else {
                None
            }
        }
        1..=60 => (updated.status != Status::InProgress)
            .then_some((Status::InProgress, AutomationRule::ProgressActive)),
        61..=99 => (updated.status != Status::Review)
            .then_some((Status::Review, AutomationRule::ProgressNearDone)),
        _ => (updated.status != Status::Done)
            .then_some((Status::Done, AutomationRule::ProgressComplete)),
    };

    if let Some((status, fired)) = normalized {
        updated.status = status;
        rule = Some(fired);
    }

    // Rule 2: QA gate on Done. Overrides rule 1 when it fires.
    if updated.status == Status::Done {
        let missing: Vec<ChecklistItem> = MANDATORY_QA_ITEMS
            .iter()
            .copied()
            .filter(|text| !updated.checklist.iter().any(|i| i.text == *text))
            .map(ChecklistItem::new)
            .collect();

        if !missing.is_empty() {
            updated.checklist.extend(missing);
            updated.status = Status::Review;
            rule = Some(AutomationRule::QaChecklistGenerated);
        } else {
            let all_qa_checked = updated
                .checklist
                .iter()
                .filter(|i| MANDATORY_QA_ITEMS.contains(&i.text.as_str()))
                .all(|i| i.checked);

            if !all_qa_checked {
                updated.status = Status::Review;
                rule = Some(AutomationRule::QaVerificationIncomplete);
            }
        }
    }

    AutomationOutcome { task: updated, rule }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProjectId, Status, Task};

    fn task(status: Status, progress: u8) -> Task {
        Task::new(ProjectId::new("proj-1"), "fixture")
            .with_status(status)
            .with_progress(progress)
    }

    fn qa_checklist(checked: bool) -> Vec<ChecklistItem> {
        MANDATORY_QA_ITEMS
            .iter()
            .map(|text| {
                if checked {
                    ChecklistItem::checked(*text)
                } else {
                    ChecklistItem::new(*text)
                }
            })
            .collect()
    }

    #[test]
    fn test_zero_progress_demotes_to_todo() {
        let outcome = apply_automation(&task(Status::InProgress, 0));
        assert_eq!(outcome.task.status, Status::Todo);
        assert_eq!(outcome.rule, Some(AutomationRule::ProgressZero));
        assert_eq!(outcome.rule.unwrap().to_string(), "0% → Not Started");
    }

    #[test]
    fn test_zero_progress_preserves_backlog() {
        let outcome = apply_automation(&task(Status::Backlog, 0));
        assert_eq!(outcome.task.status, Status::Backlog);
        assert_eq!(outcome.rule, None);
    }

    #[test]
    fn test_zero_progress_preserves_todo() {
        let outcome = apply_automation(&task(Status::Todo, 0));
        assert_eq!(outcome.task.status, Status::Todo);
        assert_eq!(outcome.rule, None);
    }

    #[test]
    fn test_progress_boundaries() {
        // (progress, expected column) across every partition boundary.
        let cases = [
            (1, Status::InProgress),
            (60, Status::InProgress),
            (61, Status::Review),
            (99, Status::Review),
        ];
        for (progress, expected) in cases {
            let outcome = apply_automation(&task(Status::Backlog, progress));
            assert_eq!(outcome.task.status, expected, "progress {progress}");
        }
    }

    #[test]
    fn test_progress_in_matching_column_fires_nothing() {
        let outcome = apply_automation(&task(Status::InProgress, 45));
        assert_eq!(outcome.task.status, Status::InProgress);
        assert_eq!(outcome.rule, None);
    }

    #[test]
    fn test_overflow_progress_clamps_to_done_path() {
        // 255 clamps to 100 and takes the Done path, which the QA gate
        // then intercepts.
        let outcome = apply_automation(&task(Status::InProgress, 255));
        assert_eq!(outcome.task.status, Status::Review);
        assert_eq!(outcome.rule, Some(AutomationRule::QaChecklistGenerated));
    }

    #[test]
    fn test_done_with_empty_checklist_generates_qa_items() {
        let outcome = apply_automation(&task(Status::Review, 100));
        assert_eq!(outcome.task.status, Status::Review);
        assert_eq!(outcome.rule, Some(AutomationRule::QaChecklistGenerated));
        assert_eq!(outcome.task.checklist.len(), MANDATORY_QA_ITEMS.len());
        for (item, text) in outcome.task.checklist.iter().zip(MANDATORY_QA_ITEMS) {
            assert_eq!(item.text, text);
            assert!(!item.checked);
        }
        assert_eq!(
            outcome.rule.unwrap().to_string(),
            "QA Block: mandatory checklist generated."
        );
    }

    #[test]
    fn test_done_with_partial_qa_items_appends_missing_only() {
        let existing = vec![ChecklistItem::checked(MANDATORY_QA_ITEMS[0])];
        let input = task(Status::Done, 100).with_checklist(existing);
        let outcome = apply_automation(&input);
        assert_eq!(outcome.task.status, Status::Review);
        assert_eq!(outcome.rule, Some(AutomationRule::QaChecklistGenerated));
        assert_eq!(outcome.task.checklist.len(), 3);
        // The pre-existing item is untouched; the two missing ones are
        // appended unchecked at the tail.
        assert!(outcome.task.checklist[0].checked);
        assert!(!outcome.task.checklist[1].checked);
        assert!(!outcome.task.checklist[2].checked);
    }

    #[test]
    fn test_done_with_unchecked_qa_items_blocks_verification() {
        let input = task(Status::Done, 100).with_checklist(qa_checklist(false));
        let outcome = apply_automation(&input);
        assert_eq!(outcome.task.status, Status::Review);
        assert_eq!(outcome.rule, Some(AutomationRule::QaVerificationIncomplete));
        // No new items were generated.
        assert_eq!(outcome.task.checklist.len(), 3);
        assert_eq!(
            outcome.rule.unwrap().to_string(),
            "QA Block: complete verification."
        );
    }

    #[test]
    fn test_done_with_all_qa_checked_stays_done() {
        let input = task(Status::InProgress, 100).with_checklist(qa_checklist(true));
        let outcome = apply_automation(&input);
        assert_eq!(outcome.task.status, Status::Done);
        assert_eq!(outcome.rule, Some(AutomationRule::ProgressComplete));
        assert_eq!(outcome.task.checklist, input.checklist);
    }

    #[test]
    fn test_extra_checklist_items_do_not_block_done() {
        let mut checklist = qa_checklist(true);
        checklist.push(ChecklistItem::new("unrelated follow-up"));
        let input = task(Status::Done, 100).with_checklist(checklist);
        let outcome = apply_automation(&input);
        assert_eq!(outcome.task.status, Status::Done);
        assert_eq!(outcome.rule, None);
    }

    #[test]
    fn test_already_done_and_verified_fires_nothing() {
        let input = task(Status::Done, 100).with_checklist(qa_checklist(true));
        let outcome = apply_automation(&input);
        assert_eq!(outcome.task, input);
        assert_eq!(outcome.rule, None);
    }

    #[test]
    fn test_qa_gate_never_skipped_at_full_progress() {
        // For any starting column at 100%, the task either leaves Done
        // or carries a fully checked QA checklist.
        for status in Status::ALL {
            let outcome = apply_automation(&task(status, 100));
            if outcome.task.status == Status::Done {
                for text in MANDATORY_QA_ITEMS {
                    let item = outcome
                        .task
                        .checklist
                        .iter()
                        .find(|i| i.text == text)
                        .expect("mandatory item present");
                    assert!(item.checked);
                }
            }
        }
    }

    #[test]
    fn test_idempotent_over_state_sweep() {
        // Applying the engine to its own output must leave the task
        // unchanged across every column/progress/checklist combination.
        // A task blocked at 100% with unchecked QA items keeps reporting
        // the QA rule (the discrepancy persists), but never mutates
        // further.
        let progresses = [0u8, 1, 30, 60, 61, 99, 100];
        for status in Status::ALL {
            for progress in progresses {
                for checklist in [Vec::new(), qa_checklist(false), qa_checklist(true)] {
                    let input = task(status, progress).with_checklist(checklist);
                    let first = apply_automation(&input);
                    let second = apply_automation(&first.task);
                    assert_eq!(second.task, first.task, "{status:?} @ {progress}%");
                    if first.rule.is_none() {
                        assert_eq!(second.rule, None, "{status:?} @ {progress}%");
                    }
                }
            }
        }
    }
}
