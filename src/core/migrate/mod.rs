//! Documentation migration: literal find-and-replace over target files.
//!
//! A `MigrationPlan` holds the ordered rules and the ordered targets. Each
//! target is read whole, folded through every rule, and written back in place.

mod apply;
mod plan;
mod rules;

pub use apply::{rewrite_file, run};
pub use plan::{builtin_rules, MigrationPlan};
pub use rules::{apply_rules, validate_rules, Rule};
