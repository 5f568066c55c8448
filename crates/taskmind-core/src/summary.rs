//! Aggregate counts over a task snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::classify;
use crate::task::{Priority, Task};

/// Counts derived from one task snapshot. Recomputed fresh per request;
/// nothing here is cached or persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
    pub no_priority: usize,
    /// Distinct non-empty project names; order-independent (callers that
    /// need ordering re-derive it from the aggregator)
    pub projects: Vec<String>,
    pub overdue: usize,
    pub due_today: usize,
    pub due_this_week: usize,
}

/// Tally priority tiers and due windows across the task set.
///
/// Priority tiers partition the set: every task lands in exactly one of
/// high/medium/low/no_priority.
pub fn summarize(tasks: &[Task], reference: DateTime<Utc>) -> TaskSummary {
    let mut summary = TaskSummary {
        total: tasks.len(),
        ..TaskSummary::default()
    };
    let mut projects = BTreeSet::new();

    for task in tasks {
        match task.priority {
            Some(Priority::H) => summary.high_priority += 1,
            Some(Priority::M) => summary.medium_priority += 1,
            Some(Priority::L) => summary.low_priority += 1,
            None => summary.no_priority += 1,
        }

        if let Some(project) = task.project.as_deref() {
            if !project.is_empty() {
                projects.insert(project.to_string());
            }
        }

        let status = classify::classify(task, reference);
        if status.overdue {
            summary.overdue += 1;
        }
        if status.due_today {
            summary.due_today += 1;
        }
        if status.due_this_week {
            summary.due_this_week += 1;
        }
    }

    summary.projects = projects.into_iter().collect();
    summary
}
