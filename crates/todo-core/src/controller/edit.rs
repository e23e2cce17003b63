//! Inline edit state: at most one task is being edited at a time.

use crate::domain::TaskId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: TaskId, draft: String },
}

impl EditState {
    pub fn editing_id(&self) -> Option<&TaskId> {
        match self {
            EditState::Idle => None,
            EditState::Editing { id, .. } => Some(id),
        }
    }

    pub fn is_editing(&self, id: &TaskId) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn draft(&self) -> &str {
        match self {
            EditState::Idle => "",
            EditState::Editing { draft, .. } => draft,
        }
    }
}
