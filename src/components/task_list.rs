//! Task List Component
//!
//! Loading, error and ready states of the filtered list.

use leptos::prelude::*;
use todo_core::{Filter, Intent, LoadStatus};

use crate::components::TaskRow;
use crate::context::AppContext;
use crate::store::{use_todo_store, TodoStateStoreFields};

fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "Nothing to do yet.",
        Filter::Active => "No active tasks.",
        Filter::Completed => "No completed tasks.",
    }
}

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_todo_store();

    view! {
        <div class="task-list-container">
            {move || match store.status().get() {
                LoadStatus::Loading => view! { <div class="loading">"Loading..."</div> }.into_any(),
                LoadStatus::Failed(message) => view! {
                    <div class="load-error">
                        <p>{message}</p>
                        <button on:click=move |_| ctx.dispatch(Intent::Load)>"Retry"</button>
                    </div>
                }.into_any(),
                LoadStatus::Ready => view! {
                    <ul class="task-list">
                        <For
                            each=move || store.visible().get()
                            key=|task| (task.id.clone(), task.text.clone(), task.completed)
                            children=move |task| view! { <TaskRow task=task /> }
                        />
                    </ul>
                    <Show when=move || store.visible().read().is_empty()>
                        <p class="empty-state">{move || empty_message(store.filter().get())}</p>
                    </Show>
                }.into_any(),
            }}
        </div>
    }
}
