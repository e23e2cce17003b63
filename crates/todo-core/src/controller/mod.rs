//! List Controller
//!
//! In-memory authority over the task collection. Every mutation goes through
//! the repository; on success the list query is invalidated and refetched so
//! the displayed list follows the system of record.

mod edit;
mod notice;
mod query;


pub use edit::EditState;
pub use notice::{Notice, NoticeLevel};
pub use query::{Query, QueryStatus};

use crate::domain::{
    normalize_text, DomainError, DomainResult, Filter, Task, TaskCounts, TaskId, TaskPatch,
};
use crate::repository::TaskRepository;

/// Cache key of the task list query
pub const TASKS_QUERY: &str = "todos";

/// A user gesture routed to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Load,
    Add(String),
    Toggle(TaskId),
    StartEdit(TaskId),
    Draft(String),
    CommitEdit,
    CancelEdit,
    Delete(TaskId),
    Filter(Filter),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Owned view of the controller for pushing into a reactive store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSnapshot {
    /// Tasks passing the current filter
    pub visible: Vec<Task>,
    pub counts: TaskCounts,
    pub filter: Filter,
    pub edit: EditState,
    pub status: LoadStatus,
}

pub struct TaskListController<R: TaskRepository> {
    repo: R,
    query: Query<Vec<Task>>,
    edit: EditState,
    filter: Filter,
    notices: Vec<Notice>,
}

impl<R: TaskRepository> TaskListController<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            query: Query::new(TASKS_QUERY),
            edit: EditState::Idle,
            filter: Filter::All,
            notices: Vec::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn query(&self) -> &Query<Vec<Task>> {
        &self.query
    }

    /// Current collection; empty until the first fetch succeeds
    pub fn tasks(&self) -> &[Task] {
        self.query.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn status(&self) -> LoadStatus {
        match self.query.status() {
            QueryStatus::Loading => LoadStatus::Loading,
            QueryStatus::Ready(_) => LoadStatus::Ready,
            QueryStatus::Failed(message) => LoadStatus::Failed(message.clone()),
        }
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Task> {
        self.filter.apply(self.tasks())
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(self.tasks())
    }

    /// Drain notifications raised since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            visible: self.visible().into_iter().cloned().collect(),
            counts: self.counts(),
            filter: self.filter,
            edit: self.edit.clone(),
            status: self.status(),
        }
    }

    fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks().iter().find(|task| &task.id == id)
    }

    /// Fetch the list if it was never fetched or has been invalidated.
    pub async fn load(&mut self) -> DomainResult<()> {
        if !self.query.is_stale() {
            return Ok(());
        }
        match self.repo.list().await {
            Ok(tasks) => {
                log::info!("[LIST] Loaded {} tasks from {}", tasks.len(), self.repo.name());
                self.query.resolve(tasks);
                self.drop_orphaned_edit();
                Ok(())
            }
            Err(e) => {
                log::error!("[LIST] Error getting todos: {}", e);
                self.query.reject(e.to_string());
                self.notices.push(Notice::error(notice::LIST_FAILED));
                Err(e)
            }
        }
    }

    /// Invalidate and refetch after a successful mutation. A failed refetch
    /// is already logged and surfaced by `load`.
    async fn refresh(&mut self) {
        self.query.invalidate();
        if self.load().await.is_err() {
            log::warn!("[LIST] Showing last known list after failed refetch");
        }
    }

    fn drop_orphaned_edit(&mut self) {
        if let Some(id) = self.edit.editing_id() {
            if self.find(id).is_none() {
                log::debug!("[LIST] Task {} vanished while editing", id);
                self.edit = EditState::Idle;
            }
        }
    }

    /// Add a task. Blank text is ignored and yields `Ok(None)`.
    pub async fn add(&mut self, text: &str) -> DomainResult<Option<Task>> {
        let Some(text) = normalize_text(text) else {
            return Ok(None);
        };
        match self.repo.add(&text).await {
            Ok(task) => {
                log::info!("[LIST] Added task {}, invalidating {}", task.id, self.query.key());
                self.notices.push(Notice::success(notice::ADDED));
                self.refresh().await;
                Ok(Some(task))
            }
            Err(e) => {
                log::error!("[LIST] Error adding todo: {}", e);
                self.notices.push(Notice::error(notice::ADD_FAILED));
                Err(e)
            }
        }
    }

    pub async fn toggle(&mut self, id: &TaskId) -> DomainResult<()> {
        let completed = self
            .find(id)
            .map(|task| task.completed)
            .ok_or_else(|| DomainError::not_found(id))?;
        self.update(id, TaskPatch::completed(!completed)).await
    }

    async fn update(&mut self, id: &TaskId, patch: TaskPatch) -> DomainResult<()> {
        match self.repo.update(id, &patch).await {
            Ok(fields) => {
                log::debug!("[LIST] Updated task {}: {:?}", id, fields);
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                log::error!("[LIST] Error updating todo: {}", e);
                self.notices.push(Notice::error(notice::UPDATE_FAILED));
                Err(e)
            }
        }
    }

    /// Begin editing a task, discarding any unsaved draft of another edit.
    pub fn start_edit(&mut self, id: &TaskId) -> DomainResult<()> {
        let draft = self
            .find(id)
            .map(|task| task.text.clone())
            .ok_or_else(|| DomainError::not_found(id))?;
        self.edit = EditState::Editing {
            id: id.clone(),
            draft,
        };
        Ok(())
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let EditState::Editing { draft, .. } = &mut self.edit {
            *draft = text.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    /// Save the draft. Blank drafts keep the editor open; an unchanged
    /// draft closes it without touching the repository.
    pub async fn commit_edit(&mut self) -> DomainResult<()> {
        let EditState::Editing { id, draft } = &self.edit else {
            return Ok(());
        };
        let Some(text) = normalize_text(draft) else {
            return Ok(());
        };
        let id = id.clone();

        match self.find(&id).map(|task| task.text == text) {
            None => {
                self.edit = EditState::Idle;
                return Err(DomainError::not_found(&id));
            }
            Some(true) => {
                self.edit = EditState::Idle;
                return Ok(());
            }
            Some(false) => {}
        }

        self.update(&id, TaskPatch::text(text)).await?;
        if self.edit.is_editing(&id) {
            self.edit = EditState::Idle;
        }
        Ok(())
    }

    pub async fn delete(&mut self, id: &TaskId) -> DomainResult<()> {
        match self.repo.delete(id).await {
            Ok(()) => {
                log::info!("[LIST] Deleted task {}", id);
                if self.edit.is_editing(id) {
                    self.edit = EditState::Idle;
                }
                self.notices.push(Notice::success(notice::DELETED));
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                log::error!("[LIST] Error deleting todo: {}", e);
                self.notices.push(Notice::error(notice::DELETE_FAILED));
                Err(e)
            }
        }
    }

    /// Single entry point for UI gestures
    pub async fn dispatch(&mut self, intent: Intent) -> DomainResult<()> {
        match intent {
            Intent::Load => self.load().await,
            Intent::Add(text) => self.add(&text).await.map(|_| ()),
            Intent::Toggle(id) => self.toggle(&id).await,
            Intent::StartEdit(id) => self.start_edit(&id),
            Intent::Draft(text) => {
                self.set_draft(text);
                Ok(())
            }
            Intent::CommitEdit => self.commit_edit().await,
            Intent::CancelEdit => {
                self.cancel_edit();
                Ok(())
            }
            Intent::Delete(id) => self.delete(&id).await,
            Intent::Filter(filter) => {
                self.set_filter(filter);
                Ok(())
            }
        }
    }
}
