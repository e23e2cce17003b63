//! UI Components
//!
//! Leptos components for the todo card.

mod filter_tabs;
mod new_task_form;
mod task_list;
mod task_row;
mod toaster;

pub use filter_tabs::FilterTabs;
pub use new_task_form::NewTaskForm;
pub use task_list::TaskList;
pub use task_row::TaskRow;
pub use toaster::Toaster;
