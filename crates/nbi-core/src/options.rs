use std::path::PathBuf;

use chrono::{Local, NaiveDate};

/// Batch validation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Submitting state; overrides the state declared in the submission.
    pub submitter_state: Option<String>,
    /// Reference date for "not in the future" rules.
    pub as_of: NaiveDate,
    /// Rule bundle CSV replacing the default workflows it names.
    pub bundle_path: Option<PathBuf>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            submitter_state: None,
            as_of: Local::now().date_naive(),
            bundle_path: None,
        }
    }
}

impl ValidationOptions {
    pub fn with_submitter_state(mut self, state: impl Into<String>) -> Self {
        self.submitter_state = Some(state.into());
        self
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn with_bundle_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bundle_path = Some(path.into());
        self
    }
}
