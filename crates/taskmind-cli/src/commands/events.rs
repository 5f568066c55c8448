//! Calendar events feed.

use taskmind_core::config::Config;
use taskmind_core::{EventSource, GoogleCalendarSource};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let source = GoogleCalendarSource::new(config.calendar)?;

    match source.fetch_today() {
        Ok(events) => println!("{}", serde_json::to_string_pretty(&events)?),
        Err(e) => println!("{}", serde_json::json!({ "error": e.to_string() })),
    }
    Ok(())
}
