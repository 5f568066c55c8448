//! Prompt synthesis for the advisory intents.
//!
//! Pure data-to-text: classified and summarized task data is rendered into
//! fixed natural-language templates. No validation is performed on the
//! resulting text; it is handed to the completion service as-is.

use chrono::{DateTime, Utc};
use indoc::formatdoc;

use crate::classify;
use crate::error::PromptError;
use crate::summary::{self, TaskSummary};
use crate::task::Task;

/// Advisory intents the assistant can serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Analyze the whole pending workload
    Analyze,
    /// Suggest improvements for the task matching `id`
    ImproveTask { id: String },
    /// Build a work plan for today
    DailyPlan,
}

/// Render the prompt for an intent against a task snapshot.
pub fn render(intent: &Intent, tasks: &[Task], reference: DateTime<Utc>) -> Result<String, PromptError> {
    match intent {
        Intent::Analyze => Ok(analyze_prompt(tasks, &summary::summarize(tasks, reference))),
        Intent::ImproveTask { id } => improve_prompt(tasks, id),
        Intent::DailyPlan => Ok(daily_plan_prompt(tasks, reference)),
    }
}

/// Workload analysis: summary counts plus the five most urgent tasks.
pub fn analyze_prompt(tasks: &[Task], summary: &TaskSummary) -> String {
    let top = classify::top_by_urgency(tasks, 5);

    formatdoc! {"
        You are a productivity assistant specialized in task analysis.

        Analyze this task summary:
        - Total tasks: {total}
        - High priority: {high}
        - Medium priority: {medium}
        - Low priority: {low}
        - No priority: {none}
        - Projects: {projects}
        - Overdue: {overdue}
        - Due today: {due_today}
        - Due this week: {due_this_week}

        Top 5 most urgent tasks:
        {top}

        Provide:
        1. A brief workload analysis
        2. Prioritization suggestions
        3. Organization recommendations
        4. Alerts about critical tasks

        Keep the response concise and practical.",
        total = summary.total,
        high = summary.high_priority,
        medium = summary.medium_priority,
        low = summary.low_priority,
        none = summary.no_priority,
        projects = summary.projects.join(", "),
        overdue = summary.overdue,
        due_today = summary.due_today,
        due_this_week = summary.due_this_week,
        top = format_task_list(&top),
    }
}

/// Improvement suggestions for one task, resolved by working-set id or
/// uuid. No match is a terminal not-found outcome.
pub fn improve_prompt(tasks: &[Task], id: &str) -> Result<String, PromptError> {
    let task = tasks
        .iter()
        .find(|t| t.matches_identifier(id))
        .ok_or_else(|| PromptError::TaskNotFound { id: id.to_string() })?;

    Ok(formatdoc! {"
        Review this task and suggest improvements:

        Task: {description}
        Project: {project}
        Priority: {priority}
        Tags: {tags}
        Due date: {due}
        Urgency: {urgency:.1}

        Suggest:
        1. A more specific, actionable description
        2. An appropriate priority
        3. Useful tags
        4. A breakdown into subtasks if needed
        5. A realistic deadline

        Keep the response practical.",
        description = task.description,
        project = task.project.as_deref().unwrap_or("not set"),
        priority = task
            .priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "not set".to_string()),
        tags = if task.tags.is_empty() { "none".to_string() } else { task.tags.join(", ") },
        due = task.due.as_deref().unwrap_or("not set"),
        urgency = task.urgency,
    })
}

/// Daily plan: overdue/due-today tasks plus the ten most urgent.
pub fn daily_plan_prompt(tasks: &[Task], reference: DateTime<Utc>) -> String {
    let today: Vec<Task> = tasks
        .iter()
        .filter(|task| {
            let status = classify::classify(task, reference);
            status.overdue || status.due_today
        })
        .cloned()
        .collect();
    let top = classify::top_by_urgency(tasks, 10);

    formatdoc! {"
        You are a daily planning assistant.

        Based on these tasks, create a work plan for today:

        Tasks due today or overdue:
        {today}

        Top 10 most urgent tasks:
        {top}

        Create a plan that includes:
        1. A suggested execution order
        2. A time estimate for each task
        3. Recommended time blocks
        4. Strategic breaks
        5. Tasks that can be delegated or postponed

        Balance productivity and well-being.",
        today = format_task_list(&today),
        top = format_task_list(&top),
    }
}

/// One task per line: description, optional project/priority/due
/// annotations, urgency to one decimal place.
fn format_task_line(task: &Task) -> String {
    let mut line = format!("- {}", task.description);
    if let Some(project) = task.project.as_deref() {
        if !project.is_empty() {
            line.push_str(&format!(" (project: {project})"));
        }
    }
    if let Some(priority) = task.priority {
        line.push_str(&format!(" [priority: {priority}]"));
    }
    if let Some(due) = task.due.as_deref() {
        if !due.is_empty() {
            line.push_str(&format!(" [due: {due}]"));
        }
    }
    line.push_str(&format!(" [urgency: {:.1}]", task.urgency));
    line
}

fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "None".to_string();
    }
    tasks
        .iter()
        .map(format_task_line)
        .collect::<Vec<_>>()
        .join("\n")
}
