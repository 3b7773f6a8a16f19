//! rofical client: CLI parsing, settings, the agenda pipeline, and
//! selection actions.

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
