//! Covpaint CLI Library
//!
//! Command-line interface for covpaint. The binary only parses arguments,
//! builds a [`CliConfig`] and dispatches to one of the [`handlers`].

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod logging;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Mode};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use handlers::RenderContext;
pub use logging::{env_filter, init_logging};
pub use output::Reporter;
pub use runner::{combined_output, go_test_args, run_go_test, ProfileLocation, DEFAULT_PROFILE};
