//! Widget JSON feed commands.
//!
//! Every outcome, including failure, is a single JSON object on stdout
//! with exit code 0; the widget discriminates on the `error` key.

use chrono::Utc;
use clap::Subcommand;
use taskmind_core::config::Config;
use taskmind_core::source::{TaskSource, TaskwarriorSource, PENDING_FILTER};
use taskmind_core::widget::{self, ErrorPayload};

#[derive(Subcommand)]
pub enum WidgetAction {
    /// Pending tasks with summary counts
    Tasks {
        /// Maximum number of tasks to include; 0 removes the cap
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Active tasks grouped by project
    Projects,
    /// Count of pending tasks
    Count,
}

pub fn run(action: WidgetAction) -> Result<(), Box<dyn std::error::Error>> {
    let source = match Config::load()
        .map_err(|e| e.to_string())
        .and_then(|config| TaskwarriorSource::new(&config.tracker).map_err(|e| e.to_string()))
    {
        Ok(source) => source,
        Err(error) => return emit_error(error),
    };

    match action {
        WidgetAction::Tasks { limit } => match widget::tasks_payload(&source, limit_hint(limit), Utc::now())
        {
            Ok(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
            Err(e) => return emit_error(e.to_string()),
        },
        WidgetAction::Projects => {
            let payload = widget::projects_payload(&source);
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        WidgetAction::Count => match source.count(&[PENDING_FILTER]) {
            Ok(pending) => println!("{}", serde_json::json!({ "pending": pending })),
            Err(e) => return emit_error(e.to_string()),
        },
    }
    Ok(())
}

fn emit_error(error: String) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(&ErrorPayload { error })?);
    Ok(())
}

/// Zero means no limit hint: the export runs uncapped.
fn limit_hint(limit: usize) -> Option<usize> {
    (limit > 0).then_some(limit)
}
