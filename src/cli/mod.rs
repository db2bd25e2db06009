//! Command line interface

pub mod commands;
pub mod display;
pub mod manifest;

pub use commands::{CliArgs, Commands, GlobalOptions};
