//! Storage Slot
//!
//! One key in a flat key-value store holding an opaque blob.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::DomainResult;

pub trait StorageSlot {
    /// Current blob, `None` when the key was never written
    fn read(&self) -> DomainResult<Option<String>>;

    /// Replace the blob
    fn write(&self, blob: &str) -> DomainResult<()>;
}

/// In-memory slot. Clones share the same cell so a test can keep a handle
/// and inspect what the repository wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    blob: Rc<RefCell<Option<String>>>,
    writes: Rc<RefCell<usize>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        let slot = Self::default();
        *slot.blob.borrow_mut() = Some(blob.into());
        slot
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }

    /// Number of writes so far
    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> DomainResult<Option<String>> {
        Ok(self.blob.borrow().clone())
    }

    fn write(&self, blob: &str) -> DomainResult<()> {
        *self.blob.borrow_mut() = Some(blob.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
