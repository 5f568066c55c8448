//! Widget payload assembly.
//!
//! Output contract for the tasks feed: either
//! `{"tasks": [...], "summary": {...}}` or `{"error": "..."}`, never both.
//! Consumers discriminate on the presence of the `error` key. The
//! projects feed always carries `projectsSummary`, with an `error` string
//! beside an empty list on failure.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::{self, ProjectGroup};
use crate::classify::{self, ClassifiedTask};
use crate::error::SourceError;
use crate::source::{TaskSource, ACTIVE_FILTERS, PENDING_FILTER};
use crate::summary::{self, TaskSummary};

/// Success shape of the tasks feed.
#[derive(Debug, Serialize)]
pub struct TasksPayload {
    pub tasks: Vec<ClassifiedTask>,
    pub summary: TaskSummary,
}

/// Failure shape shared by the widget feeds.
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

/// Projects feed shape; `error` is set only on failure, alongside an
/// empty list.
#[derive(Debug, Serialize)]
pub struct ProjectsPayload {
    #[serde(rename = "projectsSummary")]
    pub projects_summary: Vec<ProjectGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Pending tasks, most urgent first, with summary counts over the fetched
/// set.
pub fn tasks_payload<S: TaskSource + ?Sized>(
    source: &S,
    limit: Option<usize>,
    reference: DateTime<Utc>,
) -> Result<TasksPayload, SourceError> {
    let mut tasks = source.fetch(&[PENDING_FILTER], limit)?;
    classify::sort_by_urgency(&mut tasks);

    let summary = summary::summarize(&tasks, reference);
    let tasks = tasks
        .into_iter()
        .map(|task| ClassifiedTask::derive(task, reference))
        .collect();

    Ok(TasksPayload { tasks, summary })
}

/// Active tasks grouped by project. Failures are folded into the payload
/// per the projects-feed contract.
pub fn projects_payload<S: TaskSource + ?Sized>(source: &S) -> ProjectsPayload {
    match source.fetch(&ACTIVE_FILTERS, None) {
        Ok(tasks) => ProjectsPayload {
            projects_summary: aggregate::aggregate(tasks),
            error: None,
        },
        Err(e) => ProjectsPayload {
            projects_summary: Vec::new(),
            error: Some(e.to_string()),
        },
    }
}
