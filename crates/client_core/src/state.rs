//! Local view state for the todo list and the transitions applied to it.
//!
//! Every transition is keyed by [`TaskId`], never by position, so responses
//! that arrive out of order still land on the right entry.

use shared::domain::{Task, TaskId};

/// The single in-progress edit, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    target: Option<TaskId>,
    draft_text: String,
}

impl EditSession {
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&TaskId> {
        self.target.as_ref()
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    fn clear(&mut self) {
        self.target = None;
        self.draft_text.clear();
    }
}

/// Read-only copy of the state handed to renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoSnapshot {
    pub tasks: Vec<Task>,
    pub edit_session: EditSession,
    pub draft: String,
}

/// Result of merging a created task into the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Appended,
    /// The server answered with an id already in the list; the entry was
    /// replaced in place to keep ids unique.
    ReplacedExisting,
}

#[derive(Debug, Default)]
pub struct TodoState {
    tasks: Vec<Task>,
    edit_session: EditSession,
    draft: String,
}

impl TodoState {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit_session
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot {
            tasks: self.tasks.clone(),
            edit_session: self.edit_session.clone(),
            draft: self.draft.clone(),
        }
    }

    /// Replaces the list wholesale. Later duplicates of an id are dropped and
    /// their count returned. An edit whose target vanished is abandoned.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> usize {
        let incoming = tasks.len();
        let mut unique: Vec<Task> = Vec::with_capacity(incoming);
        for task in tasks {
            if !unique.iter().any(|kept| kept.id == task.id) {
                unique.push(task);
            }
        }
        let dropped = incoming - unique.len();
        self.tasks = unique;

        let target_missing = self
            .edit_session
            .target()
            .is_some_and(|target| self.find(target).is_none());
        if target_missing {
            self.edit_session.clear();
            self.draft.clear();
        }
        dropped
    }

    pub fn insert_created(&mut self, task: Task) -> Insertion {
        match self.position(&task.id) {
            Some(index) => {
                self.tasks[index] = task;
                Insertion::ReplacedExisting
            }
            None => {
                self.tasks.push(task);
                Insertion::Appended
            }
        }
    }

    /// Swaps in the server's representation at the same position. Returns
    /// `false` when the id is no longer present; the task is not re-inserted.
    pub fn replace_task(&mut self, task: Task) -> bool {
        match self.position(&task.id) {
            Some(index) => {
                self.tasks[index] = task;
                true
            }
            None => false,
        }
    }

    /// Returns `true` if an entry was removed. Removing the edit target also
    /// ends the edit.
    pub fn remove_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.edit_session.target() == Some(id) {
            self.edit_session.clear();
            self.draft.clear();
        }
        self.tasks.len() != before
    }

    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        let Some(text) = self.find(id).map(|task| task.text.clone()) else {
            return false;
        };
        self.edit_session = EditSession {
            target: Some(id.clone()),
            draft_text: text.clone(),
        };
        self.draft = text;
        true
    }

    pub fn cancel_edit(&mut self) {
        self.edit_session.clear();
        self.draft.clear();
    }

    /// Ends the edit for `id` if it is still the active one. Returns whether
    /// anything was cleared.
    pub fn finish_edit(&mut self, id: &TaskId) -> bool {
        if self.edit_session.target() != Some(id) {
            return false;
        }
        self.edit_session.clear();
        self.draft.clear();
        true
    }

    pub fn set_draft(&mut self, text: String) {
        if self.edit_session.is_active() {
            self.edit_session.draft_text.clone_from(&text);
        }
        self.draft = text;
    }

    pub fn clear_draft(&mut self) {
        self.set_draft(String::new());
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
