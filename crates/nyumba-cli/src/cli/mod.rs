//! Command-line interface: argument parsing and command handlers

pub mod args;
pub mod commands;
pub mod handlers;

pub use args::Args;
