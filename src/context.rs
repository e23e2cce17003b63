//! Application Context
//!
//! Shared controller handle provided via Leptos Context API.

use std::rc::Rc;

use futures::lock::Mutex;
use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_core::{Intent, TaskListController, TaskRepository};

use crate::store::{store_publish, store_push_toast, TodoStore};

/// Controller over whichever backend was selected at startup
pub type Controller = TaskListController<Box<dyn TaskRepository>>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Intents run one at a time against the controller
    controller: StoredValue<Rc<Mutex<Controller>>, LocalStorage>,
    store: TodoStore,
}

impl AppContext {
    pub fn new(controller: Controller, store: TodoStore) -> Self {
        Self {
            controller: StoredValue::new_local(Rc::new(Mutex::new(controller))),
            store,
        }
    }

    /// Run an intent in the background
    pub fn dispatch(&self, intent: Intent) {
        self.dispatch_then(intent, |_| {});
    }

    /// Run an intent, publish the resulting state and toasts, then report
    /// whether it succeeded.
    pub fn dispatch_then(&self, intent: Intent, on_done: impl FnOnce(bool) + 'static) {
        let shared = self.controller.get_value();
        let store = self.store;
        spawn_local(async move {
            let mut controller = shared.lock().await;
            let result = controller.dispatch(intent).await;
            if let Err(e) = &result {
                log::debug!("[APP] Intent failed: {}", e);
            }
            store_publish(&store, controller.snapshot());
            for notice in controller.take_notices() {
                store_push_toast(&store, notice);
            }
            drop(controller);
            on_done(result.is_ok());
        });
    }
}
