//! List Filters
//!
//! Three-way view over the task collection and the counts shown on the tabs.

use super::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Sizes of the three filtered views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            all: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    pub fn get(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}
