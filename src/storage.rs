//! Browser Storage Slot
//!
//! The local variant keeps the whole list under one `localStorage` key.

use gloo_storage::{LocalStorage, Storage};
use todo_core::{DomainError, DomainResult, StorageSlot};

pub const STORAGE_KEY: &str = "todos";

/// Raw string access to one `localStorage` key
pub struct BrowserSlot {
    key: &'static str,
}

impl BrowserSlot {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

fn storage_error(err: wasm_bindgen::JsValue) -> DomainError {
    DomainError::Storage(format!("{:?}", err))
}

impl StorageSlot for BrowserSlot {
    fn read(&self) -> DomainResult<Option<String>> {
        LocalStorage::raw().get_item(self.key).map_err(storage_error)
    }

    fn write(&self, blob: &str) -> DomainResult<()> {
        LocalStorage::raw().set_item(self.key, blob).map_err(storage_error)
    }
}
