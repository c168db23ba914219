//! UI/backend events and error modeling for the desktop todo window.

use client_core::{ClientEvent, EditSession, RemoteCallError, RemoteOperation};
use shared::domain::Task;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    TasksChanged(Vec<Task>),
    EditSessionChanged(EditSession),
    DraftReplaced(String),
    Error(UiError),
}

impl From<ClientEvent> for UiEvent {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::TasksChanged(tasks) => UiEvent::TasksChanged(tasks),
            ClientEvent::EditSessionChanged(session) => UiEvent::EditSessionChanged(session),
            ClientEvent::DraftReplaced(text) => UiEvent::DraftReplaced(text),
            ClientEvent::Error(err) => UiEvent::Error(UiError::from_remote(&err)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Malformed,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Load,
    Create,
    Update,
    Delete,
}

impl From<RemoteOperation> for UiErrorContext {
    fn from(operation: RemoteOperation) -> Self {
        match operation {
            RemoteOperation::List => UiErrorContext::Load,
            RemoteOperation::Create => UiErrorContext::Create,
            RemoteOperation::Update => UiErrorContext::Update,
            RemoteOperation::Delete => UiErrorContext::Delete,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_remote(err: &RemoteCallError) -> Self {
        Self::from_message(err.operation().into(), err.message())
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("error sending request")
            || message_lower.contains("connection")
            || message_lower.contains("dns")
            || message_lower.contains("timed out")
            || message_lower.contains("unreachable")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("http status")
            || message_lower.contains("status client error")
            || message_lower.contains("status server error")
        {
            UiErrorCategory::Server
        } else if message_lower.contains("decoding")
            || message_lower.contains("expected")
            || message_lower.contains("response carried task")
        {
            UiErrorCategory::Malformed
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line status text; the action is left as it was so the user can
    /// simply try again.
    pub fn status_line(&self) -> String {
        let action = match self.context {
            UiErrorContext::BackendStartup => "start the backend worker",
            UiErrorContext::Load => "load tasks",
            UiErrorContext::Create => "add the task",
            UiErrorContext::Update => "update the task",
            UiErrorContext::Delete => "delete the task",
        };
        let hint = match self.category {
            UiErrorCategory::Transport => "server unreachable; check the API URL and retry",
            UiErrorCategory::Server => "the server rejected the request",
            UiErrorCategory::Malformed => "the server sent an unexpected response",
            UiErrorCategory::Unknown => self.message.as_str(),
        };
        format!("Couldn't {action}: {hint}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_refused_connection_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::Load,
            "error sending request for url (http://localhost:5000/api/todos)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(
            err.status_line(),
            "Couldn't load tasks: server unreachable; check the API URL and retry"
        );
    }

    #[test]
    fn classifies_status_failures_as_server_errors() {
        let err = UiError::from_message(
            UiErrorContext::Delete,
            "HTTP status client error (404 Not Found) for url (http://h/api/todos/1)",
        );
        assert_eq!(err.category(), UiErrorCategory::Server);
        assert_eq!(err.context(), UiErrorContext::Delete);
    }

    #[test]
    fn maps_remote_operation_to_context() {
        let remote = RemoteCallError::new(RemoteOperation::Create, "error decoding response body");
        let err = UiError::from_remote(&remote);
        assert_eq!(err.context(), UiErrorContext::Create);
        assert_eq!(err.category(), UiErrorCategory::Malformed);
        assert_eq!(err.message(), "error decoding response body");
    }

    #[test]
    fn unknown_errors_show_raw_message() {
        let err = UiError::from_message(UiErrorContext::Update, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.status_line(), "Couldn't update the task: something odd");
    }

    #[test]
    fn client_errors_become_ui_errors() {
        let event = UiEvent::from(ClientEvent::Error(RemoteCallError::new(
            RemoteOperation::Update,
            "boom",
        )));
        match event {
            UiEvent::Error(err) => assert_eq!(err.context(), UiErrorContext::Update),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
