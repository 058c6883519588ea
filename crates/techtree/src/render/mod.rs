//! Layer renderers
//!
//! Each layer knows how to draw one kind of scene item onto a
//! [`Canvas`](crate::core::Canvas). [`TreeCanvas`] sequences them into a frame.

pub mod colors;
mod connection;
pub mod geometry;
mod grid;
mod labels;
mod node;
mod tree_canvas;

pub use colors::{color_gradient_for, connection_color, type_gradient, Gradient};
pub use connection::*;
pub use grid::draw_grid;
pub use labels::*;
pub use node::*;
pub use tree_canvas::*;
