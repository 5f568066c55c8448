//! Advisory orchestration: fetch, classify, synthesize, complete.

use chrono::{DateTime, Utc};

use crate::completion::CompletionClient;
use crate::error::{CoreError, PromptError};
use crate::prompt::{self, Intent};
use crate::source::{TaskSource, PENDING_FILTER};

/// Drives the advisory path end to end: one tracker fetch, one prompt,
/// one completion call. Nothing is retried and nothing outlives the call.
pub struct TaskAssistant<S> {
    source: S,
    client: CompletionClient,
}

impl<S: TaskSource> TaskAssistant<S> {
    pub fn new(source: S, client: CompletionClient) -> Self {
        TaskAssistant { source, client }
    }

    /// Serve one advisory intent and return the generated advice.
    ///
    /// Two outcomes are user-visible text rather than failures: an empty
    /// pending set for Analyze, and an unknown identifier for ImproveTask.
    pub fn advise(&self, intent: &Intent, reference: DateTime<Utc>) -> Result<String, CoreError> {
        let tasks = self.source.fetch(&[PENDING_FILTER], None)?;

        if tasks.is_empty() && matches!(intent, Intent::Analyze) {
            return Ok("No pending tasks found.".to_string());
        }

        let text = match prompt::render(intent, &tasks, reference) {
            Ok(text) => text,
            Err(err @ PromptError::TaskNotFound { .. }) => return Ok(err.to_string()),
        };

        Ok(self.client.generate(&text)?)
    }
}
