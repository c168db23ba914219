use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned task identifier. Never generated on the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single to-do entry as stored by the remote API.
///
/// The API is backed by a document store and names its key `_id`; plain `id`
/// is accepted on input as well, and `_id` wins when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskWire")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, text: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed,
        }
    }
}

#[derive(Deserialize)]
struct TaskWire {
    #[serde(rename = "_id")]
    document_id: Option<TaskId>,
    id: Option<TaskId>,
    text: String,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<TaskWire> for Task {
    type Error = String;

    fn try_from(wire: TaskWire) -> Result<Self, Self::Error> {
        let id = wire
            .document_id
            .or(wire.id)
            .ok_or_else(|| "task is missing both `_id` and `id`".to_string())?;
        Ok(Self {
            id,
            text: wire.text,
            completed: wire.completed,
        })
    }
}
