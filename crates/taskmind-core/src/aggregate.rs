//! Project grouping for the projects-summary widget.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::task::Task;

/// Bucket for tasks without a project. Always sorts after named groups.
pub const UNASSIGNED_BUCKET: &str = "Outros";

/// Tasks sharing one project name, counted.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectGroup {
    pub project: String,
    pub count: usize,
    pub tasks: Vec<Task>,
}

/// Group tasks by project.
///
/// Named groups come out in lexicographic order; the unassigned bucket, if
/// non-empty, is appended last regardless of its alphabetical position.
/// Task order within each group is the input order.
pub fn aggregate(tasks: Vec<Task>) -> Vec<ProjectGroup> {
    let mut named: BTreeMap<String, Vec<Task>> = BTreeMap::new();
    let mut unassigned: Vec<Task> = Vec::new();

    for task in tasks {
        match task.project.as_deref() {
            Some(name) if !name.is_empty() && name != UNASSIGNED_BUCKET => {
                named.entry(name.to_string()).or_default().push(task);
            }
            _ => unassigned.push(task),
        }
    }

    let mut groups: Vec<ProjectGroup> = named
        .into_iter()
        .map(|(project, tasks)| ProjectGroup {
            count: tasks.len(),
            project,
            tasks,
        })
        .collect();

    if !unassigned.is_empty() {
        groups.push(ProjectGroup {
            project: UNASSIGNED_BUCKET.to_string(),
            count: unassigned.len(),
            tasks: unassigned,
        });
    }

    groups
}
