//! Due-window classification and urgency ordering.
//!
//! Classification never fails: a missing or malformed due string degrades
//! to all-false so that one bad field cannot invalidate a whole
//! aggregation run.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use crate::task::Task;

/// Due-window facts derived for one task against a reference instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DueStatus {
    pub overdue: bool,
    pub due_today: bool,
    pub due_this_week: bool,
}

/// Parse a tracker due timestamp.
///
/// Accepts RFC 3339 (a trailing `Z` designator is equivalent to `+00:00`)
/// and the compact `YYYYMMDDTHHMMSSZ` form Taskwarrior 3 emits.
pub(crate) fn parse_due(due: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(due) {
        return Some(parsed);
    }
    NaiveDateTime::parse_from_str(due, "%Y%m%dT%H%M%SZ")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Classify one task against a reference instant.
///
/// Overdue compares instants; due-today and due-this-week compare calendar
/// dates in the due timestamp's own timezone. The week window is
/// `[today, today + 7 days]` inclusive.
pub fn classify(task: &Task, reference: DateTime<Utc>) -> DueStatus {
    let Some(due) = task.due.as_deref() else {
        return DueStatus::default();
    };
    let Some(due_at) = parse_due(due) else {
        return DueStatus::default();
    };

    let today = reference.with_timezone(due_at.offset()).date_naive();
    let due_date = due_at.date_naive();
    let week_end = today + Duration::days(7);

    DueStatus {
        overdue: due_at.with_timezone(&Utc) < reference,
        due_today: due_date == today,
        due_this_week: today <= due_date && due_date <= week_end,
    }
}

/// Sort most urgent first. The sort is stable, so ties keep tracker order.
pub fn sort_by_urgency(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.urgency
            .partial_cmp(&a.urgency)
            .unwrap_or(Ordering::Equal)
    });
}

/// The `n` most urgent tasks, without disturbing the input order.
pub fn top_by_urgency(tasks: &[Task], n: usize) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sort_by_urgency(&mut sorted);
    sorted.truncate(n);
    sorted
}

/// Widget view of a task: the raw fields plus derived due annotations.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedTask {
    #[serde(flatten)]
    pub task: Task,
    /// `YYYY-MM-DD`, present only when the due string parses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_formatted: Option<String>,
    pub is_overdue: bool,
    pub is_due_today: bool,
    pub is_due_this_week: bool,
}

impl ClassifiedTask {
    pub fn derive(task: Task, reference: DateTime<Utc>) -> Self {
        let status = classify(&task, reference);
        let due_formatted = task
            .due
            .as_deref()
            .and_then(parse_due)
            .map(|due_at| due_at.format("%Y-%m-%d").to_string());
        ClassifiedTask {
            task,
            due_formatted,
            is_overdue: status.overdue,
            is_due_today: status.due_today,
            is_due_this_week: status.due_this_week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> DateTime<Utc> {
        "2024-06-01T00:00:00Z".parse().unwrap()
    }

    fn task_due(due: &str) -> Task {
        let mut task = Task::new("due test");
        task.due = Some(due.to_string());
        task
    }

    #[test]
    fn no_due_is_all_false() {
        let status = classify(&Task::new("no due"), reference());
        assert_eq!(status, DueStatus::default());
    }

    #[test]
    fn unparseable_due_degrades_to_false() {
        let status = classify(&task_due("not-a-date"), reference());
        assert_eq!(status, DueStatus::default());
    }

    #[test]
    fn past_due_is_overdue() {
        let status = classify(&task_due("2024-01-01T00:00:00Z"), reference());
        assert!(status.overdue);
        assert!(!status.due_today);
        assert!(!status.due_this_week);
    }

    #[test]
    fn overdue_is_strict() {
        // Due exactly at the reference instant is not overdue.
        let status = classify(&task_due("2024-06-01T00:00:00Z"), reference());
        assert!(!status.overdue);
        assert!(status.due_today);
    }

    #[test]
    fn zulu_equals_explicit_utc_offset() {
        let zulu = classify(&task_due("2024-06-01T12:00:00Z"), reference());
        let offset = classify(&task_due("2024-06-01T12:00:00+00:00"), reference());
        assert_eq!(zulu, offset);
        assert!(zulu.due_today);
    }

    #[test]
    fn compact_tracker_format_parses() {
        let status = classify(&task_due("20240601T120000Z"), reference());
        assert!(status.due_today);
        assert!(status.due_this_week);
    }

    #[test]
    fn due_today_uses_the_dues_own_timezone() {
        // 2024-06-01T01:00:00+09:00 is 2024-05-31T16:00:00Z. In its own
        // timezone the reference instant is already June 1st.
        let status = classify(&task_due("2024-06-01T01:00:00+09:00"), reference());
        assert!(status.due_today);
        // And in UTC terms the instant is in the past.
        assert!(status.overdue);
    }

    #[test]
    fn week_window_is_inclusive() {
        let on_boundary = classify(&task_due("2024-06-08T23:00:00Z"), reference());
        assert!(on_boundary.due_this_week);

        let past_boundary = classify(&task_due("2024-06-09T00:00:00Z"), reference());
        assert!(!past_boundary.due_this_week);
    }

    #[test]
    fn yesterday_is_not_in_week_window() {
        let status = classify(&task_due("2024-05-31T12:00:00Z"), reference());
        assert!(status.overdue);
        assert!(!status.due_this_week);
    }

    #[test]
    fn urgency_sort_is_descending_and_stable() {
        let mut a = Task::new("first");
        a.urgency = 2.0;
        let mut b = Task::new("second");
        b.urgency = 9.0;
        let mut c = Task::new("third");
        c.urgency = 2.0;

        let mut tasks = vec![a, b, c];
        sort_by_urgency(&mut tasks);

        assert_eq!(tasks[0].description, "second");
        // Ties keep tracker order.
        assert_eq!(tasks[1].description, "first");
        assert_eq!(tasks[2].description, "third");
    }

    #[test]
    fn top_by_urgency_truncates_without_mutating_input() {
        let mut a = Task::new("low");
        a.urgency = 1.0;
        let mut b = Task::new("high");
        b.urgency = 8.0;
        let tasks = vec![a, b];

        let top = top_by_urgency(&tasks, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].description, "high");
        assert_eq!(tasks[0].description, "low");
    }

    #[test]
    fn classified_task_annotations() {
        let derived = ClassifiedTask::derive(task_due("2024-01-01T00:00:00Z"), reference());
        assert_eq!(derived.due_formatted.as_deref(), Some("2024-01-01"));
        assert!(derived.is_overdue);

        let json = serde_json::to_value(&derived).unwrap();
        assert_eq!(json["due_formatted"], "2024-01-01");
        assert_eq!(json["is_overdue"], true);
        // Flattened task fields sit at the top level.
        assert_eq!(json["description"], "due test");
    }

    #[test]
    fn classified_task_without_due_has_no_formatted_date() {
        let derived = ClassifiedTask::derive(Task::new("free"), reference());
        assert!(derived.due_formatted.is_none());
        let json = serde_json::to_value(&derived).unwrap();
        assert!(json.get("due_formatted").is_none());
        assert_eq!(json["is_overdue"], false);
    }
}
