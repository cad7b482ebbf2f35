//! CLI, configuration, page input and link actions
//!
//! This crate provides the `quickcal` command-line interface.

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
