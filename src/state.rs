//! Owned view state
//!
//! The current datasets and parameters live in one explicit state value that
//! pure functions (grid aggregation, layer composition) read from, instead
//! of ambient mutable fields. The state starts empty with default
//! parameters; datasets are replaced wholesale when their fetch resolves,
//! and composition is attempted only once both populations are present.

use crate::config::VisualParameters;
use crate::sample::{Dataset, Scope};

/// Everything the visualization derives from
#[derive(Debug, Default)]
pub struct ViewState {
    local: Option<Dataset>,
    global: Option<Dataset>,
    pub params: VisualParameters,
}

impl ViewState {
    /// Empty datasets, default parameters
    pub fn new() -> Self {
        ViewState::default()
    }

    /// Replace one population's dataset wholesale
    pub fn set_dataset(&mut self, scope: Scope, dataset: Dataset) {
        match scope {
            Scope::Local => self.local = Some(dataset),
            Scope::Global => self.global = Some(dataset),
        }
    }

    /// Both datasets once both fetches have resolved, None until then
    pub fn datasets(&self) -> Option<(&Dataset, &Dataset)> {
        match (&self.local, &self.global) {
            (Some(local), Some(global)) => Some((local, global)),
            _ => None,
        }
    }
}
