//! User-facing notifications raised by list operations.

pub const ADDED: &str = "Added";
pub const DELETED: &str = "Todo deleted successfully.";
pub const ADD_FAILED: &str = "Failed to add todo. Please try again.";
pub const LIST_FAILED: &str = "Failed to get todo. Please try again.";
pub const UPDATE_FAILED: &str = "Failed to update todo. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete todo. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
