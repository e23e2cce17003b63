//! Repository Layer
//!
//! Persistence adapters behind one trait: a hosted table reached over HTTP and
//! a single browser storage slot holding the whole list.

mod traits;
mod slot;
mod local;
mod remote;
pub mod codec;


pub use traits::TaskRepository;
pub use slot::{MemorySlot, StorageSlot};
pub use local::LocalTaskRepository;
pub use remote::{BackendConfig, RemoteTaskRepository};
