// State management module.
// Section loading state for projects and activity, and the loader that fills it.

pub mod loader;
pub mod section;

pub use loader::{ACTIVITY_ERROR, DataKind, LoadResult, Loader, PROJECTS_ERROR};
pub use section::{LoadingState, Section};

use crate::activity::ActivityItem;
use crate::github::Project;

/// Both sections of the viewer.
#[derive(Debug, Default)]
pub struct PortfolioState {
    pub projects: Section<Project>,
    pub activity: Section<ActivityItem>,
}

impl PortfolioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a section as loading. Also used for retry.
    pub fn begin_load(&mut self, kind: DataKind) {
        match kind {
            DataKind::Projects => self.projects.set_loading(),
            DataKind::Activity => self.activity.set_loading(),
        }
    }

    /// Apply a finished load to its section.
    pub fn apply(&mut self, result: LoadResult) {
        match result {
            LoadResult::Projects(Ok(items)) => self.projects.set_loaded(items),
            LoadResult::Projects(Err(e)) => self.projects.set_error(e),
            LoadResult::Activity(Ok(items)) => self.activity.set_loaded(items),
            LoadResult::Activity(Err(e)) => self.activity.set_error(e),
        }
    }

    pub fn is_loading(&self, kind: DataKind) -> bool {
        match kind {
            DataKind::Projects => self.projects.data.is_loading(),
            DataKind::Activity => self.activity.data.is_loading(),
        }
    }
}
