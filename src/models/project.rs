use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{display_opt as opt, Category, Material, Step};

/// A do-it-yourself project.
///
/// Projects are the top-level unit of work. A project owns its steps and
/// materials outright and holds category references without owning the
/// category lifecycle. `project_id` stays `None` until a successful insert
/// assigns the generated key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    /// Estimated hours to complete, two decimal places.
    pub estimated_hours: Option<Decimal>,
    /// Actual hours spent, two decimal places.
    pub actual_hours: Option<Decimal>,
    /// Difficulty rating on a 1-5 scale.
    pub difficulty: Option<i32>,
    pub notes: Option<String>,

    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "   ID={}", opt(&self.project_id))?;
        writeln!(f, "   name={}", opt(&self.project_name))?;
        writeln!(f, "   estimated hours={}", opt(&self.estimated_hours))?;
        writeln!(f, "   actual hours={}", opt(&self.actual_hours))?;
        writeln!(f, "   difficulty={}", opt(&self.difficulty))?;
        writeln!(f, "   notes={}", opt(&self.notes))?;

        writeln!(f, "   Materials:")?;
        for material in &self.materials {
            writeln!(f, "      {material}")?;
        }

        writeln!(f, "   Steps:")?;
        for step in &self.steps {
            writeln!(f, "      {step}")?;
        }

        writeln!(f, "   Categories:")?;
        for category in &self.categories {
            writeln!(f, "      {category}")?;
        }

        Ok(())
    }
}
