//! # Taskmind Core Library
//!
//! Taskmind turns a local Taskwarrior-style tracker into data feeds for a
//! desktop widget and into prompts for an LLM-backed advisory feature.
//! All operations are available through this library; the CLI binary is a
//! thin layer over it.
//!
//! ## Pipeline
//!
//! - **Source**: shells out to the tracker with a bounded time budget and
//!   returns structured task records
//! - **Classify**: derives due-window facts (overdue, due today, due this
//!   week) and the urgency ordering
//! - **Aggregate / Summary**: project groups for the widget, tallied
//!   counts for the summary panel
//! - **Prompt / Assistant**: renders advisory prompts and drives the
//!   completion service
//!
//! Everything is ephemeral: each invocation fetches a fresh snapshot,
//! computes its outputs, and discards the lot.
//!
//! ## Key components
//!
//! - [`TaskSource`]: capability interface over the tracker
//! - [`TaskAssistant`]: advisory orchestration
//! - [`Config`]: TOML configuration management
//! - [`widget`]: JSON payload assembly for the widget feeds

pub mod aggregate;
pub mod assistant;
pub mod calendar;
pub mod classify;
pub mod completion;
pub mod config;
pub mod error;
pub mod prompt;
pub mod source;
pub mod summary;
pub mod task;
pub mod widget;

pub use aggregate::{aggregate, ProjectGroup, UNASSIGNED_BUCKET};
pub use assistant::TaskAssistant;
pub use calendar::{CalendarEvent, EventSource, GoogleCalendarSource};
pub use classify::{classify, ClassifiedTask, DueStatus};
pub use completion::{CompletionClient, CompletionConfig};
pub use config::{Config, TrackerConfig};
pub use error::{ConfigError, CoreError, PromptError, ServiceError, SourceError};
pub use prompt::Intent;
pub use source::{TaskSource, TaskwarriorSource};
pub use summary::{summarize, TaskSummary};
pub use task::{Priority, Task};
