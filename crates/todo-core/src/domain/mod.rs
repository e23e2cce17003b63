//! Domain Layer
//!
//! Task entity, the structured update contract, list filters and errors.
//! No I/O happens here.

mod error;
mod filter;
mod task;

pub use error::{DomainError, DomainResult};
pub use filter::{Filter, TaskCounts};
pub use task::{normalize_text, require_text, Task, TaskFields, TaskId, TaskPatch};
