//! LLM-backed advisory commands.

use chrono::Utc;
use clap::Subcommand;
use taskmind_core::config::Config;
use taskmind_core::prompt::Intent;
use taskmind_core::source::TaskwarriorSource;
use taskmind_core::{CompletionClient, TaskAssistant};

#[derive(Subcommand)]
pub enum AdviseAction {
    /// Analyze the pending workload
    Analyze,
    /// Suggest improvements for one task
    Improve {
        /// Working-set id or uuid of the task
        id: String,
    },
    /// Generate a work plan for today
    Plan,
}

pub fn run(action: AdviseAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let source = TaskwarriorSource::new(&config.tracker)?;
    let client = CompletionClient::new(config.ollama)?;
    let assistant = TaskAssistant::new(source, client);

    let intent = match action {
        AdviseAction::Analyze => Intent::Analyze,
        AdviseAction::Improve { id } => Intent::ImproveTask { id },
        AdviseAction::Plan => Intent::DailyPlan,
    };

    let reply = assistant.advise(&intent, Utc::now())?;
    println!("{reply}");
    Ok(())
}
