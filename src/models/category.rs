use std::fmt;

use serde::{Deserialize, Serialize};

/// A label shared across projects through the `project_category` join table.
/// Name uniqueness is not enforced at this layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID={}, name={}",
            super::display_opt(&self.category_id),
            super::display_opt(&self.category_name),
        )
    }
}
