//! Domain entities for workbench.
//!
//! Each entity mirrors one row of the relational schema. Scalar fields are
//! `Option`s because entities start life as empty value objects and are
//! populated either by the shell or by row mapping; `Project` additionally
//! carries the child collections it owns.
//!
//! - [`Project`]: a do-it-yourself project with hour estimates, a difficulty
//!   rating, and notes. Owns its steps and materials, references categories.
//! - [`Step`]: one ordered instruction belonging to a project.
//! - [`Material`]: a required material with quantity and optional cost.
//! - [`Category`]: a label shared across projects via a join table.

use std::fmt;

mod category;
mod material;
mod project;
mod step;

pub use category::*;
pub use material::*;
pub use project::*;
pub use step::*;

/// Render an optional field for console output.
pub(crate) fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(none)".to_string(),
    }
}
