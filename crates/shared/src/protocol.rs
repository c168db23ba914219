use serde::{Deserialize, Serialize};

/// Body of `POST /api/todos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub text: String,
}

/// Body of `PUT /api/todos/{id}`. Edits send only `text`, toggles send only
/// `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateTaskRequest {
    Text { text: String },
    Completed { completed: bool },
}

impl UpdateTaskRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn completed(completed: bool) -> Self {
        Self::Completed { completed }
    }
}
