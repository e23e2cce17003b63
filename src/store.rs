//! Todo Store
//!
//! Reactive mirror of the list controller. Components read from here; only
//! `AppContext::dispatch` writes list state.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use todo_core::{EditState, Filter, ListSnapshot, LoadStatus, Notice, Task, TaskCounts, TaskId};

/// How long a toast stays on screen
const TOAST_MILLIS: u32 = 3_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub notice: Notice,
}

/// Rendered list state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    /// Tasks passing the current filter
    pub visible: Vec<Task>,
    pub counts: TaskCounts,
    pub filter: Filter,
    pub edit: EditState,
    pub status: LoadStatus,
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

pub type TodoStore = Store<TodoState>;

/// Get the todo store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy a controller snapshot into the store, touching only changed fields
/// so unrelated views are not rebuilt.
pub fn store_publish(store: &TodoStore, snapshot: ListSnapshot) {
    if *store.visible().read_untracked() != snapshot.visible {
        *store.visible().write() = snapshot.visible;
    }
    if *store.counts().read_untracked() != snapshot.counts {
        *store.counts().write() = snapshot.counts;
    }
    if *store.filter().read_untracked() != snapshot.filter {
        *store.filter().write() = snapshot.filter;
    }
    if *store.edit().read_untracked() != snapshot.edit {
        *store.edit().write() = snapshot.edit;
    }
    if *store.status().read_untracked() != snapshot.status {
        *store.status().write() = snapshot.status;
    }
}

/// Completion flag of a task among the rendered ones
pub fn completed_in(tasks: &[Task], id: &TaskId) -> Option<bool> {
    tasks.iter().find(|task| &task.id == id).map(|task| task.completed)
}

/// Show a toast and schedule its removal
pub fn store_push_toast(store: &TodoStore, notice: Notice) {
    let id = {
        let field = store.next_toast_id();
        let mut next = field.write();
        *next += 1;
        *next
    };
    store.toasts().write().push(Toast { id, notice });

    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(TOAST_MILLIS).await;
        store_dismiss_toast(&store, id);
    });
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &TodoStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}
