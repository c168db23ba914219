//! Backend commands queued from UI to backend worker.

use shared::domain::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Load,
    SetDraft { text: String },
    Create { text: String },
    BeginEdit { id: TaskId },
    CancelEdit,
    SubmitEdit { text: String },
    Delete { id: TaskId },
    ToggleComplete { id: TaskId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Load => "load",
            BackendCommand::SetDraft { .. } => "set_draft",
            BackendCommand::Create { .. } => "create",
            BackendCommand::BeginEdit { .. } => "begin_edit",
            BackendCommand::CancelEdit => "cancel_edit",
            BackendCommand::SubmitEdit { .. } => "submit_edit",
            BackendCommand::Delete { .. } => "delete",
            BackendCommand::ToggleComplete { .. } => "toggle_complete",
        }
    }

    /// Commands that only touch local state; they run in order on the
    /// worker instead of being spawned.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            BackendCommand::SetDraft { .. }
                | BackendCommand::BeginEdit { .. }
                | BackendCommand::CancelEdit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_edit_and_draft_commands_run_inline() {
        let id = TaskId::from("1");
        let routing = [
            (BackendCommand::Load, false),
            (BackendCommand::SetDraft { text: "a".into() }, true),
            (BackendCommand::Create { text: "a".into() }, false),
            (BackendCommand::BeginEdit { id: id.clone() }, true),
            (BackendCommand::CancelEdit, true),
            (BackendCommand::SubmitEdit { text: "a".into() }, false),
            (BackendCommand::Delete { id: id.clone() }, false),
            (BackendCommand::ToggleComplete { id }, false),
        ];
        for (cmd, local) in routing {
            assert_eq!(cmd.is_local(), local, "{}", cmd.name());
        }
    }
}
