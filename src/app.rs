//! Todo App
//!
//! Picks the persistence backend, provides context, and lays out the card.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_core::{
    Intent, LocalTaskRepository, RemoteTaskRepository, TaskListController, TaskRepository,
};

use crate::components::{FilterTabs, NewTaskForm, TaskList, Toaster};
use crate::config::{BuildEnv, StorageChoice};
use crate::context::AppContext;
use crate::storage::{BrowserSlot, STORAGE_KEY};
use crate::store::TodoState;

fn build_repository(choice: StorageChoice) -> Box<dyn TaskRepository> {
    match choice {
        StorageChoice::Remote(config) => {
            log::info!("[APP] Using hosted table at {}", config.table_url());
            Box::new(RemoteTaskRepository::new(config))
        }
        StorageChoice::Local => {
            log::info!("[APP] Using browser storage key '{}'", STORAGE_KEY);
            Box::new(LocalTaskRepository::load(BrowserSlot::new(STORAGE_KEY)))
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(TodoState::default());
    provide_context(store);

    let repo = build_repository(BuildEnv::current().storage_choice());
    let ctx = AppContext::new(TaskListController::new(repo), store);
    provide_context(ctx);

    // Initial fetch
    Effect::new(move |_| ctx.dispatch(Intent::Load));

    view! {
        <main class="page">
            <div class="card">
                <h1 class="card-title">"Todo List"</h1>
                <NewTaskForm />
                <FilterTabs />
                <TaskList />
            </div>
            <Toaster />
        </main>
    }
}
