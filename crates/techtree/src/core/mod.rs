//! Core building blocks shared by every layer
//!
//! Geometry and paint types, the drawing surface trait with its recording and
//! SVG backends, configuration, errors and logging.

mod canvas;
mod config;
mod error;
pub mod logging;
mod svg_canvas;
mod types;

pub use canvas::*;
pub use config::*;
pub use error::*;
pub use logging::*;
pub use svg_canvas::*;
pub use types::*;
