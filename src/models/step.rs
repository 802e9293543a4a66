use std::fmt;

use serde::{Deserialize, Serialize};

/// One ordered instruction within a project.
///
/// `step_order` is caller-supplied; neither uniqueness nor contiguity is
/// validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step_id: Option<i64>,
    pub project_id: Option<i64>,
    pub step_text: Option<String>,
    pub step_order: Option<i32>,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID={}, text={}",
            super::display_opt(&self.step_id),
            super::display_opt(&self.step_text),
        )
    }
}
