//! Test fixtures shared by the workspace: a mock npm registry and a sandboxed
//! runner for the `npm-alfred` binary.

pub mod registry;
pub mod sandbox;
