//! Pantry command line client: bootstrap and CLI on top of the workspace
//! crates.

pub mod bootstrap;
pub mod cli;
