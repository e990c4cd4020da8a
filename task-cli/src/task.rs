use crate::error::TaskError;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A tracked task.
///
/// Timestamps are kept as the text found in the store so files written by other tools load and
/// save back unchanged. New timestamps are RFC 3339.
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub(crate) id: u32,
    pub(crate) description: String,
    pub(crate) status: Status,
    pub(crate) created_at: String,
    /// Empty until the task is first modified.
    #[serde(default)]
    pub(crate) updated_at: String,
}

impl Task {
    pub(crate) fn new(id: u32, description: String) -> Self {
        Self {
            id,
            description,
            status: Status::Todo,
            created_at: now(),
            updated_at: String::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn updated_at(&self) -> Option<&str> {
        Some(self.updated_at.as_str()).filter(|updated_at| !updated_at.is_empty())
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = now();
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Turns command-line text into a task id.
///
/// Ids are matched as the decimal text used for store keys, so anything that is not exactly such
/// a key (`abc`, `-1`, `007`) names a task that does not exist.
pub fn parse_id(raw: &str) -> Result<u32, TaskError> {
    raw.parse::<u32>()
        .ok()
        .filter(|id| id.to_string() == raw)
        .ok_or_else(|| TaskError::NotFound(raw.to_string()))
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t(created {}",
            self.id, self.status, self.description, self.created_at
        )?;
        if let Some(updated_at) = self.updated_at() {
            write!(f, ", updated {}", updated_at)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
