//! Task Row Component
//!
//! One task: checkbox, label or inline editor, and row actions.

use leptos::html;
use leptos::prelude::*;
use todo_core::{Intent, Task};

use crate::context::AppContext;
use crate::store::{completed_in, use_todo_store, TodoStateStoreFields};

#[component]
pub fn TaskRow(task: Task) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_todo_store();

    let completed = task.completed;
    let text = StoredValue::new(task.text);
    let id = StoredValue::new(task.id);

    let is_editing = Memo::new(move |_| id.with_value(|id| store.edit().read().is_editing(id)));
    let checked = Memo::new(move |_| {
        id.with_value(|id| completed_in(&store.visible().read(), id))
            .unwrap_or(completed)
    });

    // The browser flips the box on click. Once the intent settles, put it
    // back in line with the store, which is unchanged if the update failed.
    let check_input = NodeRef::<html::Input>::new();
    let on_toggle = move |_| {
        ctx.dispatch_then(Intent::Toggle(id.get_value()), move |_| {
            if let (Some(Some(input)), Some(checked)) =
                (check_input.try_get_untracked(), checked.try_get_untracked())
            {
                input.set_checked(checked);
            }
        });
    };
    let on_save = move |_| ctx.dispatch(Intent::CommitEdit);
    let on_cancel = move |_| ctx.dispatch(Intent::CancelEdit);
    let on_edit = move |_| ctx.dispatch(Intent::StartEdit(id.get_value()));
    let on_delete = move |_| ctx.dispatch(Intent::Delete(id.get_value()));

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            ctx.dispatch(Intent::CommitEdit);
        }
        "Escape" => ctx.dispatch(Intent::CancelEdit),
        _ => {}
    };

    // Focus the editor as soon as it is mounted
    let edit_input = NodeRef::<html::Input>::new();
    Effect::new(move |_| {
        if let Some(input) = edit_input.get() {
            if let Err(e) = input.focus() {
                log::debug!("[APP] Could not focus editor: {:?}", e);
            }
        }
    });

    view! {
        <li class=move || if is_editing.get() { "task-row editing" } else { "task-row" }>
            <div class="task-main">
                <input
                    type="checkbox"
                    class="task-check"
                    node_ref=check_input
                    prop:checked=move || checked.get()
                    prop:disabled=move || is_editing.get()
                    on:change=on_toggle
                />

                {move || if is_editing.get() {
                    view! {
                        <div class="task-editor">
                            <input
                                type="text"
                                class="edit-input"
                                node_ref=edit_input
                                value=text.get_value()
                                on:input=move |ev| ctx.dispatch(Intent::Draft(event_target_value(&ev)))
                                on:keydown=on_keydown
                            />
                            <button class="save-btn" title="Save edit" on:click=on_save>"✓"</button>
                            <button class="cancel-btn" title="Cancel edit" on:click=on_cancel>"✗"</button>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <span class=if completed { "task-text completed" } else { "task-text" }>
                            {text.get_value()}
                        </span>
                    }.into_any()
                }}
            </div>

            <Show when=move || !is_editing.get()>
                <div class="task-actions">
                    <button class="edit-btn" title="Edit task" on:click=on_edit>"✎"</button>
                    <button class="delete-btn" title="Delete task" on:click=on_delete>"×"</button>
                </div>
            </Show>
        </li>
    }
}
