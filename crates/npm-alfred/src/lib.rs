//! Alfred workflow that searches the npm registry.

pub mod icon;
pub mod logging;
pub mod workflow;

pub use icon::Icon;
pub use workflow::{Outcome, RenderError, Workflow};
