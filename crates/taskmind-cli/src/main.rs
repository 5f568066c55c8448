use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "taskmind", version, about = "Task intelligence for widgets and AI advice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Widget JSON feeds
    Widget {
        #[command(subcommand)]
        action: commands::widget::WidgetAction,
    },
    /// LLM-backed task advice
    Advise {
        #[command(subcommand)]
        action: commands::advise::AdviseAction,
    },
    /// Today's calendar events as JSON
    Events,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Widget { action } => commands::widget::run(action),
        Commands::Advise { action } => commands::advise::run(action),
        Commands::Events => commands::events::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
