#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handler_commands;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod presentation;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, load_env_files, log_env_files};
pub use commands::{Commands, LaunchArgs, RunArgs};
pub use config_commands::ConfigCommand;
pub use error::{CliError, exit_code_for};
pub use handler_commands::{HandlerCommand, HandlerValues};
pub use parser::Cli;
