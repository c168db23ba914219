use std::fmt;

use thiserror::Error;

/// The four calls the remote todo API supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A remote call failed. Network failures, non-success statuses and
/// undecodable bodies all collapse into this one kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("remote call `{operation}` failed: {message}")]
pub struct RemoteCallError {
    operation: RemoteOperation,
    message: String,
}

impl RemoteCallError {
    pub fn new(operation: RemoteOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }

    pub(crate) fn from_http(operation: RemoteOperation, err: reqwest::Error) -> Self {
        Self::new(operation, err.to_string())
    }

    pub fn operation(&self) -> RemoteOperation {
        self.operation
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
