//! New Task Form Component
//!
//! Text input plus add button. The input is cleared only once the task has
//! been stored.

use leptos::prelude::*;
use todo_core::Intent;

use crate::context::AppContext;

#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (new_text, set_new_text) = signal(String::new());

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get();
        if text.trim().is_empty() {
            return;
        }
        ctx.dispatch_then(Intent::Add(text), move |added| {
            if added {
                set_new_text.set(String::new());
            }
        });
    };

    view! {
        <form class="new-task-form" on:submit=add_task>
            <input
                type="text"
                class="new-task-input"
                placeholder="Add task here..."
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
            />
            <button type="submit" class="add-btn" title="Add task">"+"</button>
        </form>
    }
}
