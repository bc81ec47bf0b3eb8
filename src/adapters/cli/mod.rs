//! CLI Adapter
//!
//! Command-line interface for the ProphetSol service.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{load, CliApp, Command, ServeCmd, TokenInfoCmd, TokenInfoRichCmd, ValidateCmd};

use anyhow::Result;

use crate::config::Config;

/// Initialize the CLI application
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}

/// Execute the CLI command
pub async fn execute(app: CliApp, config: Config) -> Result<()> {
    commands::execute(app, config).await
}
