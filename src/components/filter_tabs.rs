//! Filter Tabs Component
//!
//! All / Active / Completed tabs with live counts.

use leptos::prelude::*;
use todo_core::{Filter, Intent};

use crate::context::AppContext;
use crate::store::{use_todo_store, TodoStateStoreFields};

#[component]
pub fn FilterTabs() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_todo_store();

    view! {
        <div class="filter-tabs">
            {Filter::ALL.into_iter().map(|filter| {
                let is_active = move || store.filter().get() == filter;
                let tab_class = move || {
                    if is_active() { "filter-tab active" } else { "filter-tab" }
                };
                let label = move || format!("{} ({})", filter.label(), store.counts().get().get(filter));

                view! {
                    <button
                        class=tab_class
                        on:click=move |_| ctx.dispatch(Intent::Filter(filter))
                    >
                        {label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
