//! Alfred Script Filter feedback: the JSON document a workflow prints for the
//! launcher to display.
//!
//! Field names and nesting follow the Script Filter format exactly.

mod emission;
mod item;

pub use emission::Emission;
pub use item::{FeedbackDocument, FeedbackItem, ModAction, Mods};
