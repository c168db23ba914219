use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{Task, TaskId},
    protocol::{CreateTaskRequest, UpdateTaskRequest},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

pub mod config;
pub mod error;
pub mod state;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use error::{RemoteCallError, RemoteOperation};
pub use state::{EditSession, TodoSnapshot};
pub use transport::HttpTodoApi;

use state::{Insertion, TodoState};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The remote collaborator holding the authoritative task collection.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, RemoteCallError>;
    async fn create(&self, request: CreateTaskRequest) -> Result<Task, RemoteCallError>;
    async fn update(&self, id: &TaskId, request: UpdateTaskRequest)
        -> Result<Task, RemoteCallError>;
    async fn delete(&self, id: &TaskId) -> Result<(), RemoteCallError>;
}

/// What a controller action ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The response was reconciled into local state.
    Applied,
    /// A precondition did not hold; no request was sent.
    Skipped,
    /// The call succeeded but the task was no longer listed locally, so the
    /// response was dropped.
    Stale,
    /// The call failed; local state is exactly as it was before.
    Failed(RemoteCallError),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    TasksChanged(Vec<Task>),
    EditSessionChanged(EditSession),
    /// The controller replaced the input text (edit started, draft cleared).
    /// Plain typing through [`TodoListController::set_draft`] does not emit this.
    DraftReplaced(String),
    Error(RemoteCallError),
}

/// Owns the task list and edit state, and reconciles API responses into them.
///
/// Actions take `&self` and may run concurrently. The state lock is never held
/// across a network call; each response is matched back to its task by id.
pub struct TodoListController {
    api: Arc<dyn TodoApi>,
    inner: Mutex<TodoState>,
    events: broadcast::Sender<ClientEvent>,
}

impl TodoListController {
    pub fn new(api: Arc<dyn TodoApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            api,
            inner: Mutex::new(TodoState::default()),
            events,
        })
    }

    pub fn with_settings(settings: &ClientSettings) -> anyhow::Result<Arc<Self>> {
        let api = HttpTodoApi::from_settings(settings)?;
        info!(api_url = %api.collection_url(), "using todo api");
        Ok(Self::new(Arc::new(api)))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> TodoSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn load(&self) -> ActionOutcome {
        let tasks = match self.api.list().await {
            Ok(tasks) => tasks,
            Err(err) => return self.report_failure(err),
        };

        let mut guard = self.inner.lock().await;
        let was_editing = guard.edit_session().is_active();
        let dropped = guard.replace_all(tasks);
        if dropped > 0 {
            warn!(dropped, "list response repeated task ids; kept first occurrences");
        }
        info!(count = guard.tasks().len(), "loaded tasks");
        self.publish_tasks(&guard);
        if was_editing && !guard.edit_session().is_active() {
            self.publish_edit_session(&guard);
            self.publish_draft(&guard);
        }
        ActionOutcome::Applied
    }

    pub async fn create(&self, text: &str) -> ActionOutcome {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring create with blank text");
            return ActionOutcome::Skipped;
        }

        let request = CreateTaskRequest {
            text: text.to_string(),
        };
        let created = match self.api.create(request).await {
            Ok(task) => task,
            Err(err) => return self.report_failure(err),
        };

        let task_id = created.id.clone();
        let mut guard = self.inner.lock().await;
        if guard.insert_created(created) == Insertion::ReplacedExisting {
            warn!(task_id = %task_id, "create returned an id that is already listed");
        }
        guard.clear_draft();
        info!(task_id = %task_id, "created task");
        self.publish_tasks(&guard);
        self.publish_draft(&guard);
        if guard.edit_session().is_active() {
            self.publish_edit_session(&guard);
        }
        ActionOutcome::Applied
    }

    pub async fn begin_edit(&self, id: &TaskId) -> ActionOutcome {
        let mut guard = self.inner.lock().await;
        if !guard.begin_edit(id) {
            debug!(task_id = %id, "cannot edit a task that is not listed");
            return ActionOutcome::Skipped;
        }
        self.publish_edit_session(&guard);
        self.publish_draft(&guard);
        ActionOutcome::Applied
    }

    pub async fn cancel_edit(&self) {
        let mut guard = self.inner.lock().await;
        guard.cancel_edit();
        self.publish_edit_session(&guard);
        self.publish_draft(&guard);
    }

    pub async fn set_draft(&self, text: impl Into<String>) {
        self.inner.lock().await.set_draft(text.into());
    }

    pub async fn submit_edit(&self, text: &str) -> ActionOutcome {
        let target = self.inner.lock().await.edit_session().target().cloned();
        let Some(target) = target else {
            debug!("ignoring submit without an active edit");
            return ActionOutcome::Skipped;
        };
        let text = text.trim();
        if text.is_empty() {
            debug!(task_id = %target, "ignoring submit with blank text");
            return ActionOutcome::Skipped;
        }

        let updated = match self
            .api
            .update(&target, UpdateTaskRequest::text(text))
            .await
            .and_then(|task| ensure_same_task(&target, task))
        {
            Ok(task) => task,
            Err(err) => return self.report_failure(err),
        };

        let mut guard = self.inner.lock().await;
        let applied = self.apply_update(&mut guard, updated);
        if guard.finish_edit(&target) {
            self.publish_edit_session(&guard);
            self.publish_draft(&guard);
        }
        if applied {
            info!(task_id = %target, "updated task text");
            ActionOutcome::Applied
        } else {
            ActionOutcome::Stale
        }
    }

    pub async fn delete(&self, id: &TaskId) -> ActionOutcome {
        if let Err(err) = self.api.delete(id).await {
            return self.report_failure(err);
        }

        let mut guard = self.inner.lock().await;
        let was_edit_target = guard.edit_session().target() == Some(id);
        let removed = guard.remove_task(id);
        if was_edit_target {
            self.publish_edit_session(&guard);
            self.publish_draft(&guard);
        }
        if removed {
            info!(task_id = %id, "deleted task");
            self.publish_tasks(&guard);
            ActionOutcome::Applied
        } else {
            debug!(task_id = %id, "delete confirmed for a task no longer listed");
            ActionOutcome::Stale
        }
    }

    /// Sends the negation of the locally known `completed` value.
    pub async fn toggle_complete(&self, id: &TaskId) -> ActionOutcome {
        let current = self
            .inner
            .lock()
            .await
            .find(id)
            .map(|task| task.completed);
        let Some(current) = current else {
            debug!(task_id = %id, "cannot toggle a task that is not listed");
            return ActionOutcome::Skipped;
        };

        let updated = match self
            .api
            .update(id, UpdateTaskRequest::completed(!current))
            .await
            .and_then(|task| ensure_same_task(id, task))
        {
            Ok(task) => task,
            Err(err) => return self.report_failure(err),
        };

        let mut guard = self.inner.lock().await;
        if self.apply_update(&mut guard, updated) {
            info!(task_id = %id, completed = !current, "toggled task");
            ActionOutcome::Applied
        } else {
            ActionOutcome::Stale
        }
    }

    fn apply_update(&self, state: &mut TodoState, task: Task) -> bool {
        let task_id = task.id.clone();
        if state.replace_task(task) {
            self.publish_tasks(state);
            true
        } else {
            warn!(task_id = %task_id, "dropping update response for a task no longer listed");
            false
        }
    }

    fn report_failure(&self, err: RemoteCallError) -> ActionOutcome {
        error!(operation = %err.operation(), "{err}");
        let _ = self.events.send(ClientEvent::Error(err.clone()));
        ActionOutcome::Failed(err)
    }

    fn publish_tasks(&self, state: &TodoState) {
        let _ = self
            .events
            .send(ClientEvent::TasksChanged(state.tasks().to_vec()));
    }

    fn publish_edit_session(&self, state: &TodoState) {
        let _ = self
            .events
            .send(ClientEvent::EditSessionChanged(state.edit_session().clone()));
    }

    fn publish_draft(&self, state: &TodoState) {
        let _ = self
            .events
            .send(ClientEvent::DraftReplaced(state.draft().to_string()));
    }
}

fn ensure_same_task(requested: &TaskId, task: Task) -> Result<Task, RemoteCallError> {
    if &task.id == requested {
        Ok(task)
    } else {
        Err(RemoteCallError::new(
            RemoteOperation::Update,
            format!(
                "response carried task {} for a request on task {requested}",
                task.id
            ),
        ))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
