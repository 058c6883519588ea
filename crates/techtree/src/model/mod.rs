//! Technology tree data model
//!
//! Snapshots, localized text, JSON loading and structural validation.

mod localized;
mod tree;
mod validation;

pub use localized::*;
pub use tree::*;
pub use validation::*;
