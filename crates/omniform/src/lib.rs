//! Command-line front end for omniform: configuration loading and the
//! command handlers behind the `omniform` binary.

pub mod commands;
pub mod config;

pub use commands::CommandError;
pub use config::{ConfigError, ConfigLoader, OmniformConfig};
