use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A material required by a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub material_id: Option<i64>,
    pub project_id: Option<i64>,
    pub material_name: Option<String>,
    /// Number of units required.
    pub num_required: Option<i32>,
    /// Cost per unit; `None` when no cost is tracked.
    pub cost: Option<Decimal>,
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID={}, name={}, required={}, cost={}",
            super::display_opt(&self.material_id),
            super::display_opt(&self.material_name),
            super::display_opt(&self.num_required),
            super::display_opt(&self.cost),
        )
    }
}
