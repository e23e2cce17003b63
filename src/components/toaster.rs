//! Toaster Component
//!
//! Transient notifications; each one removes itself after a few seconds.

use leptos::prelude::*;
use todo_core::NoticeLevel;

use crate::store::{store_dismiss_toast, use_todo_store, TodoStateStoreFields};

#[component]
pub fn Toaster() -> impl IntoView {
    let store = use_todo_store();

    view! {
        <div class="toaster">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let toast_class = match toast.notice.level {
                        NoticeLevel::Success => "toast success",
                        NoticeLevel::Error => "toast error",
                    };
                    view! {
                        <div class=toast_class on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
