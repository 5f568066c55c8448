//! End-to-end pipeline tests over a mock task source.
//!
//! Drives fetch -> classify -> aggregate/summarize -> payload exactly as
//! the CLI does, without touching a real tracker.

use chrono::{DateTime, Utc};
use taskmind_core::error::SourceError;
use taskmind_core::source::TaskSource;
use taskmind_core::task::Task;
use taskmind_core::{aggregate, summarize, widget, UNASSIGNED_BUCKET};

struct SnapshotSource(Vec<Task>);

impl TaskSource for SnapshotSource {
    fn fetch(&self, _filters: &[&str], limit: Option<usize>) -> Result<Vec<Task>, SourceError> {
        let mut tasks = self.0.clone();
        if let Some(limit) = limit {
            tasks.truncate(limit);
        }
        Ok(tasks)
    }

    fn count(&self, _filters: &[&str]) -> Result<u64, SourceError> {
        Ok(self.0.len() as u64)
    }
}

fn reference() -> DateTime<Utc> {
    "2024-06-01T00:00:00Z".parse().unwrap()
}

fn scenario_tasks() -> Vec<Task> {
    serde_json::from_str(
        r#"[
            {"project": "Work", "due": "2024-01-01T00:00:00Z", "priority": "H", "urgency": 5.0},
            {"due": null, "priority": null, "urgency": 1.0}
        ]"#,
    )
    .unwrap()
}

#[test]
fn scenario_a_summary_and_groups() {
    let tasks = scenario_tasks();

    let summary = summarize(&tasks, reference());
    assert_eq!(summary.high_priority, 1);
    assert_eq!(summary.no_priority, 1);
    assert_eq!(summary.overdue, 1);

    let groups = aggregate(tasks);
    assert_eq!(groups.len(), 2);
    assert_eq!((groups[0].project.as_str(), groups[0].count), ("Work", 1));
    assert_eq!(
        (groups[1].project.as_str(), groups[1].count),
        (UNASSIGNED_BUCKET, 1)
    );
}

#[test]
fn scenario_b_zero_matches_is_not_an_error() {
    let payload = widget::tasks_payload(&SnapshotSource(Vec::new()), None, reference()).unwrap();

    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("error").is_none());
    assert_eq!(json["tasks"].as_array().unwrap().len(), 0);
    assert_eq!(json["summary"]["total"], 0);
    assert_eq!(json["summary"]["overdue"], 0);
    assert_eq!(json["summary"]["high_priority"], 0);
}

#[test]
fn scenario_e_malformed_due_does_not_abort_the_run() {
    let tasks: Vec<Task> = serde_json::from_str(
        r#"[
            {"description": "corrupt", "due": "not-a-date", "urgency": 3.0},
            {"description": "fine", "due": "2024-01-01T00:00:00Z", "urgency": 1.0}
        ]"#,
    )
    .unwrap();

    let payload = widget::tasks_payload(&SnapshotSource(tasks), None, reference()).unwrap();

    assert_eq!(payload.summary.total, 2);
    assert_eq!(payload.summary.overdue, 1);

    let corrupt = payload
        .tasks
        .iter()
        .find(|t| t.task.description == "corrupt")
        .unwrap();
    assert!(!corrupt.is_overdue);
    assert!(!corrupt.is_due_today);
    assert!(!corrupt.is_due_this_week);
    assert!(corrupt.due_formatted.is_none());
}

#[test]
fn pipeline_is_idempotent_for_a_fixed_reference() {
    let source = SnapshotSource(scenario_tasks());

    let first = widget::tasks_payload(&source, None, reference()).unwrap();
    let second = widget::tasks_payload(&source, None, reference()).unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );

    let groups_once = aggregate(source.0.clone());
    let groups_twice = aggregate(source.0.clone());
    assert_eq!(
        serde_json::to_value(&groups_once).unwrap(),
        serde_json::to_value(&groups_twice).unwrap()
    );
}

#[test]
fn limit_hint_caps_the_widget_list() {
    let tasks: Vec<Task> = (0..10)
        .map(|i| {
            let mut task = Task::new(format!("task-{i}"));
            task.urgency = i as f64;
            task
        })
        .collect();

    let payload = widget::tasks_payload(&SnapshotSource(tasks), Some(4), reference()).unwrap();
    assert_eq!(payload.tasks.len(), 4);
    // Summary covers the fetched set, so tiers still partition it.
    assert_eq!(payload.summary.total, 4);
    assert_eq!(payload.summary.no_priority, 4);
}
