//! Task records exported by the tracker.
//!
//! The export format is not guaranteed to include every field, so anything
//! the tracker may omit is optional with a serde default. Records are
//! ephemeral: constructed from the tracker's current snapshot, discarded
//! after the response is emitted.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Priority tier assigned by the tracker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    H,
    M,
    L,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::H => write!(f, "H"),
            Priority::M => write!(f, "M"),
            Priority::L => write!(f, "L"),
        }
    }
}

/// One unit of work from the external tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Working-set id; can change across tracker syncs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Durable identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: String,
    /// Ordering score computed by the tracker; used only for ordering,
    /// never for identity.
    #[serde(default)]
    pub urgency: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// ISO-8601 due timestamp as emitted by the tracker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

fn default_description() -> String {
    "No description".to_string()
}

impl Task {
    /// Create a task with only a description set; everything else defaults.
    pub fn new(description: impl Into<String>) -> Self {
        Task {
            id: None,
            uuid: None,
            description: description.into(),
            project: None,
            priority: None,
            status: String::new(),
            urgency: 0.0,
            tags: Vec::new(),
            due: None,
            entry: None,
            modified: None,
        }
    }

    /// Match an externally supplied identifier against the working-set id
    /// or the durable uuid.
    pub fn matches_identifier(&self, ident: &str) -> bool {
        if let (Some(id), Ok(n)) = (self.id, ident.parse::<u64>()) {
            if id == n {
                return true;
            }
        }
        ident
            .parse::<Uuid>()
            .ok()
            .is_some_and(|u| self.uuid == Some(u))
    }
}

impl Default for Task {
    fn default() -> Self {
        Task::new(default_description())
    }
}
