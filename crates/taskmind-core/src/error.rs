//! Core error types for taskmind-core.
//!
//! Each boundary of the pipeline has its own error enum; `CoreError`
//! collects them for callers that drive the whole pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskmind-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task tracker boundary failed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Completion or calendar service failed
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Prompt synthesis failed
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures at the external task tracker boundary.
///
/// Per-field problems inside otherwise well-formed records (e.g. a
/// malformed due string) are not errors at this level; classification
/// degrades those to neutral values instead.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The tracker binary is not installed or not on PATH
    #[error("task command not found: '{binary}'. Is Taskwarrior installed?")]
    ToolNotFound { binary: String },

    /// The tracker did not finish within the budget for this call class
    #[error("task command timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Non-zero exit from the tracker
    #[error("task command failed: {stderr}")]
    Command { stderr: String },

    /// Tracker output was not the expected structured format
    #[error("failed to parse task output: {0}")]
    Parse(String),

    /// Spawning or reading the tracker process failed for another reason
    #[error("failed to run task command: {0}")]
    Io(String),
}

/// Failures at an outbound HTTP service boundary (completion or calendar).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Non-success HTTP status
    #[error("service returned HTTP {status}")]
    Status { status: u16 },

    /// Connection or protocol-level failure
    #[error("failed to reach service: {0}")]
    Transport(String),

    /// The single attempt did not complete within its budget
    #[error("service call timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The configured endpoint is not a valid URL
    #[error("invalid service URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The runtime driving the blocking call could not be created
    #[error("failed to start async runtime: {0}")]
    Runtime(String),
}

/// Failures during prompt synthesis.
#[derive(Error, Debug)]
pub enum PromptError {
    /// No task matched the supplied identifier. This is a terminal,
    /// user-visible outcome, not a retryable failure.
    #[error("Task {id} not found.")]
    TaskNotFound { id: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dot-path key does not exist in the config tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Value cannot be coerced to the existing field's type
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
