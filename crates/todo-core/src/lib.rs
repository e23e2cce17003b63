//! Todo Core
//!
//! Layered the same way as the app itself:
//! - domain: tasks, filters and errors
//! - repository: persistence adapters (hosted table, browser storage)
//! - controller: the in-memory list authority driven by UI intents

pub mod controller;
pub mod domain;
pub mod repository;

pub use controller::{
    EditState, Intent, ListSnapshot, LoadStatus, Notice, NoticeLevel, Query, QueryStatus,
    TaskListController,
};
pub use domain::{
    normalize_text, require_text, DomainError, DomainResult, Filter, Task, TaskCounts, TaskFields,
    TaskId, TaskPatch,
};
pub use repository::{
    codec, BackendConfig, LocalTaskRepository, MemorySlot, RemoteTaskRepository, StorageSlot,
    TaskRepository,
};
