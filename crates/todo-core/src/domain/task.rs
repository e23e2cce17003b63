//! Task Entity
//!
//! A single todo item with text and completion status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::{DomainError, DomainResult};

/// Globally unique task identifier.
///
/// Hosted tables are keyed by uuid or bigint, so both JSON strings and JSON
/// integers are accepted and kept as their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => TaskId(s),
            RawId::Signed(n) => TaskId(n.to_string()),
            RawId::Unsigned(n) => TaskId(n.to_string()),
        })
    }
}

/// A todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Never empty once persisted
    pub text: String,
    pub completed: bool,
    /// Only set by the hosted backend; drives newest-first ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            created_at: None,
        }
    }

    /// Apply the present fields of a patch in place
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            text: self.text.clone(),
            completed: self.completed,
        }
    }
}

/// Structured partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }

    /// Reject patches that change nothing or would blank the text.
    pub fn validate(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Err(DomainError::InvalidInput("empty update".into()));
        }
        if let Some(text) = &self.text {
            require_text(text)?;
        }
        Ok(())
    }
}

/// Fields reported back after an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    pub text: String,
    pub completed: bool,
}

/// Trim user input; `None` when nothing but whitespace remains.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Like `normalize_text`, but blank input is an error.
pub fn require_text(raw: &str) -> DomainResult<String> {
    normalize_text(raw).ok_or_else(|| DomainError::InvalidInput("task text is blank".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("t-1", "buy milk");
        assert_eq!(task.id.as_str(), "t-1");
        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
        assert!(task.created_at.is_none());
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  buy milk \n"), Some("buy milk".to_string()));
        assert_eq!(normalize_text(" \t "), None);
        assert_eq!(normalize_text(""), None);
    }

    #[test]
    fn test_task_id_accepts_numbers() {
        let id: TaskId = serde_json::from_str("42").unwrap();
        assert_eq!(id, TaskId::new("42"));
        let id: TaskId = serde_json::from_str("\"6f1c\"").unwrap();
        assert_eq!(id.as_str(), "6f1c");
    }

    #[test]
    fn test_apply_patch() {
        let mut task = Task::new("1", "old");
        task.apply(&TaskPatch::completed(true));
        assert!(task.completed);
        assert_eq!(task.text, "old");

        task.apply(&TaskPatch::text("new"));
        assert_eq!(task.text, "new");
        assert!(task.completed);
    }

    #[test]
    fn test_local_shape_omits_created_at() {
        let json = serde_json::to_value(Task::new("a", "x")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "a", "text": "x", "completed": false }));
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let json = serde_json::to_value(TaskPatch::completed(false)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": false }));
        assert!(TaskPatch::default().is_empty());
    }

    #[test]
    fn test_patch_validation() {
        assert!(TaskPatch::completed(true).validate().is_ok());
        assert!(TaskPatch::text("x").validate().is_ok());
        assert!(matches!(
            TaskPatch::default().validate(),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            TaskPatch::text("   ").validate(),
            Err(DomainError::InvalidInput(_))
        ));
        assert_eq!(require_text(" a "), Ok("a".to_string()));
        assert!(require_text("\n").is_err());
    }
}
