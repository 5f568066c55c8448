//! Task tracker boundary.
//!
//! The pipeline never assumes a particular invocation mechanism: anything
//! that can produce task records implements [`TaskSource`]. The shipped
//! implementation shells out to a Taskwarrior-style binary with a bounded
//! time budget per call class.

use std::time::Duration;

use tokio::process::Command;
use tokio::runtime::Runtime;

use crate::config::TrackerConfig;
use crate::error::SourceError;
use crate::task::Task;

/// Filter selecting pending tasks. Always passed to the tracker
/// explicitly; there is no post-hoc status filtering.
pub const PENDING_FILTER: &str = "status:pending";

/// Filters selecting all active (not completed, not deleted) tasks.
pub const ACTIVE_FILTERS: [&str; 2] = ["status.not:completed", "status.not:deleted"];

/// Capability interface over the tracker. Filter expressions are
/// tracker-specific textual queries, passed through opaquely.
pub trait TaskSource {
    /// Export tasks matching the filters, optionally capped by a limit hint.
    /// Empty output is an empty sequence, not a failure.
    fn fetch(&self, filters: &[&str], limit: Option<usize>) -> Result<Vec<Task>, SourceError>;

    /// Count tasks matching the filters.
    fn count(&self, filters: &[&str]) -> Result<u64, SourceError>;
}

/// Shells out to the tracker binary. Query-only; the tracker's state is
/// never mutated from here.
pub struct TaskwarriorSource {
    binary: String,
    export_timeout: Duration,
    count_timeout: Duration,
    runtime: Runtime,
}

impl TaskwarriorSource {
    pub fn new(config: &TrackerConfig) -> Result<Self, SourceError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SourceError::Io(format!("failed to start async runtime: {e}")))?;

        Ok(TaskwarriorSource {
            binary: config.resolved_binary(),
            export_timeout: Duration::from_secs(config.export_timeout_secs),
            count_timeout: Duration::from_secs(config.count_timeout_secs),
            runtime,
        })
    }

    /// Run the tracker with the given arguments, killing it if the budget
    /// elapses.
    fn run(&self, args: &[String], timeout: Duration) -> Result<String, SourceError> {
        self.runtime.block_on(async {
            let output = tokio::time::timeout(timeout, Command::new(&self.binary).args(args).output())
                .await
                .map_err(|_| SourceError::Timeout {
                    timeout_secs: timeout.as_secs(),
                })?
                .map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => SourceError::ToolNotFound {
                        binary: self.binary.clone(),
                    },
                    _ => SourceError::Io(e.to_string()),
                })?;

            if !output.status.success() {
                return Err(SourceError::Command {
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }

            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        })
    }

    fn build_args(subcommand: &str, filters: &[&str], limit: Option<usize>) -> Vec<String> {
        let mut args = vec![subcommand.to_string()];
        args.extend(filters.iter().map(|f| f.to_string()));
        if let Some(limit) = limit {
            args.push(format!("limit:{limit}"));
        }
        args
    }
}

impl TaskSource for TaskwarriorSource {
    fn fetch(&self, filters: &[&str], limit: Option<usize>) -> Result<Vec<Task>, SourceError> {
        let args = Self::build_args("export", filters, limit);
        let stdout = self.run(&args, self.export_timeout)?;

        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(trimmed).map_err(|e| SourceError::Parse(e.to_string()))
    }

    fn count(&self, filters: &[&str]) -> Result<u64, SourceError> {
        let args = Self::build_args("count", filters, None);
        let stdout = self.run(&args, self.count_timeout)?;

        stdout
            .trim()
            .parse()
            .map_err(|e| SourceError::Parse(format!("count output {:?}: {e}", stdout.trim())))
    }
}
