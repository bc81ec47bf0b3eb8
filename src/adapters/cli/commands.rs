//! CLI Command Handlers
//!
//! `serve` runs the HTTP service; the lookup commands run one request against
//! the live upstreams and print the same JSON the service would return.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::adapters::web::{self, AppState};
use crate::application::{response, Rendered};
use crate::config::{load_config, Config};
use crate::domain::mint;

/// ProphetSol - Solana token price and metadata lookup service
#[derive(Parser, Debug)]
#[command(
    name = "prophet-sol",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Solana token lookup service (Birdeye / Jupiter / token list)",
    long_about = "ProphetSol answers price and metadata questions for a Solana mint by \
                  querying Birdeye, Jupiter and the Solana token list in fixed priority \
                  order and merging whatever succeeds."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

impl CliApp {
    /// Config file named by the active command, if any
    pub fn config_path(&self) -> Option<&Path> {
        match &self.command {
            Command::Serve(cmd) => cmd.config.as_deref(),
            Command::TokenInfo(cmd) => cmd.config.as_deref(),
            Command::TokenInfoRich(cmd) => cmd.config.as_deref(),
            Command::Validate(_) => None,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeCmd),

    /// Strict lookup: Birdeye overview, falling back to price
    TokenInfo(TokenInfoCmd),

    /// Lenient lookup: Birdeye/Jupiter price plus token-list metadata
    TokenInfoRich(TokenInfoRichCmd),

    /// Check whether a string is a valid mint address
    Validate(ValidateCmd),
}

/// Run the HTTP service
#[derive(Parser, Debug)]
pub struct ServeCmd {
    /// Path to configuration file (optional; defaults apply without one)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override listen host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Override listen port
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

/// One strict lookup
#[derive(Parser, Debug)]
pub struct TokenInfoCmd {
    /// Mint address
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// One lenient lookup
#[derive(Parser, Debug)]
pub struct TokenInfoRichCmd {
    /// Mint address
    #[arg(value_name = "MINT")]
    pub mint: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Validate a mint address
#[derive(Parser, Debug)]
pub struct ValidateCmd {
    /// Candidate mint address
    #[arg(value_name = "MINT")]
    pub mint: String,
}

/// Load config from `path` (with `~` expansion), or defaults when absent.
///
/// Environment overrides are applied here, once; command-line flags are
/// applied on top by the individual commands.
pub fn load(path: Option<&Path>) -> Result<Config> {
    load_with(path, |name| std::env::var(name).ok())
}

fn load_with<F>(path: Option<&Path>, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(p) => {
            let expanded = shellexpand::tilde(&p.to_string_lossy()).to_string();
            load_config(&expanded).with_context(|| format!("Failed to load configuration from {}", expanded))?
        }
        None => Config::default(),
    };

    config.apply_overrides(env).context("Invalid environment override")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Execute the parsed command
pub async fn execute(app: CliApp, config: Config) -> Result<()> {
    match app.command {
        Command::Serve(cmd) => serve_command(cmd, config).await,
        Command::TokenInfo(cmd) => token_info_command(cmd, &config).await,
        Command::TokenInfoRich(cmd) => token_info_rich_command(cmd, &config).await,
        Command::Validate(cmd) => validate_command(cmd),
    }
}

fn apply_serve_flags(cmd: &ServeCmd, config: &mut Config) {
    if let Some(host) = &cmd.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
}

async fn serve_command(cmd: ServeCmd, mut config: Config) -> Result<()> {
    apply_serve_flags(&cmd, &mut config);

    let state = AppState::from_config(&config).context("Failed to build provider clients")?;
    if !state.key_loaded {
        tracing::warn!("BIRDEYE_API_KEY not set - /token_info will answer missing_api_key");
    }

    let addr = config.server.bind_addr()?;
    web::start_server(addr, state).await.context("Webserver failed")?;
    Ok(())
}

async fn token_info_command(cmd: TokenInfoCmd, config: &Config) -> Result<()> {
    let state = AppState::from_config(config).context("Failed to build provider clients")?;
    let outcome = state.strict.lookup(&cmd.address).await;
    print_rendered(&response::strict(&outcome))
}

async fn token_info_rich_command(cmd: TokenInfoRichCmd, config: &Config) -> Result<()> {
    let state = AppState::from_config(config).context("Failed to build provider clients")?;
    let outcome = state.lenient.lookup(&cmd.mint).await;
    print_rendered(&response::lenient(&outcome))
}

fn validate_command(cmd: ValidateCmd) -> Result<()> {
    if mint::validate(&cmd.mint) {
        println!("valid: {}", cmd.mint.trim());
    } else {
        println!("invalid: {}", mint::INVALID_MINT_NOTE);
    }
    Ok(())
}

fn print_rendered(rendered: &Rendered) -> Result<()> {
    println!("HTTP {}", rendered.status);
    println!("{}", serde_json::to_string_pretty(&rendered.body)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_serve() {
        let app = CliApp::parse_from(["prophet-sol", "serve", "--port", "9000", "-v"]);
        assert!(app.verbose);
        match app.command {
            Command::Serve(cmd) => {
                assert_eq!(cmd.port, Some(9000));
                assert!(cmd.config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_lookup_commands() {
        let app = CliApp::parse_from([
            "prophet-sol",
            "token-info-rich",
            "So11111111111111111111111111111111111111112",
            "--config",
            "config/dev.toml",
        ]);
        assert_eq!(app.config_path(), Some(Path::new("config/dev.toml")));

        let app = CliApp::parse_from(["prophet-sol", "--debug", "validate", "short"]);
        assert!(app.debug);
        assert!(app.config_path().is_none());
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_defaults_without_path() {
        let config = load_with(None, no_env).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[server]\nport = 8123\n").unwrap();
        let config = load_with(Some(file.path()), no_env).unwrap();
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn test_port_flag_beats_port_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[server]\nport = 8123\n").unwrap();
        let mut config = load_with(Some(file.path()), |name| (name == "PORT").then(|| "8000".to_string())).unwrap();
        assert_eq!(config.server.port, 8000);

        let app = CliApp::parse_from(["prophet-sol", "serve", "--port", "9000"]);
        let Command::Serve(cmd) = app.command else {
            panic!("expected serve");
        };
        apply_serve_flags(&cmd, &mut config);
        assert_eq!(config.server.bind_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_env_base_is_validated() {
        let err = load_with(None, |name| (name == "BIRDEYE_BASE").then(|| "ftp://x".to_string())).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = load(Some(Path::new("/nonexistent/prophet.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}
