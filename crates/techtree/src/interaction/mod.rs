//! Pointer input: picking nodes and turning gestures into tree events

mod events;
mod gestures;
mod hit_test;

pub use events::*;
pub use gestures::*;
pub use hit_test::*;
