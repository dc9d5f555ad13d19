//! Command-line interface for scan-config
//!
//! One flag per configuration key. None of the flags is statically required:
//! whether a flag is mandatory depends on what defaults and the saved
//! `config.json` already resolve, so it is checked after the load step.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{resolve, CliOverrides};
use crate::domain::ServerOptions;

/// Resolve, persist, and print the map-scan server startup configuration
#[derive(Parser)]
#[command(name = "scan-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Hostname the web server binds [default: 127.0.0.1]
    #[arg(short = 'H', long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port for the web server [default: 5000]
    #[arg(short = 'P', long, value_name = "PORT")]
    pub port: Option<String>,

    /// PTC username
    #[arg(short = 'u', long, value_name = "NAME")]
    pub username: Option<String>,

    /// PTC password
    #[arg(short = 'p', long, value_name = "PASS")]
    pub password: Option<String>,

    /// Location to scan around
    #[arg(short = 'l', long, value_name = "PLACE")]
    pub location: Option<String>,

    /// Scan step limit [default: 10]
    #[arg(short = 's', long = "step_limit", value_name = "STEPS")]
    pub step_limit: Option<String>,

    /// Debug mode
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    pub debug: bool,

    /// Coordinate transformer for China
    #[arg(short = 'c', long, action = ArgAction::SetTrue)]
    pub china: bool,
}

impl Cli {
    fn into_overrides(self) -> CliOverrides {
        // Switches only override when supplied, so an unset switch maps to
        // None rather than Some(false).
        CliOverrides {
            host: self.host,
            port: self.port,
            username: self.username,
            password: self.password,
            location: self.location,
            step_limit: self.step_limit,
            debug: self.debug.then_some(true),
            china: self.china.then_some(true),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire the debug switch to the tracing log level.
    // RUST_LOG in the environment always takes precedence; -d falls back to DEBUG.
    let filter = if cli.debug {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let cwd = std::env::current_dir().context("Failed resolving working directory")?;
    let (_, options) = resolve(&cwd, &cli.into_overrides())?;

    print_summary(&options);
    Ok(())
}

// Credentials stay out of the summary; they are only in config.json.
fn print_summary(options: &ServerOptions) {
    println!("Resolved configuration:");
    println!("  host: {}", options.host);
    println!("  port: {}", options.port);
    println!("  location: {}", options.location);
    println!("  step_limit: {}", options.step_limit);
    println!("  debug: {}", options.debug);
    println!("  china: {}", options.china);
}
