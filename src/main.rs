//! Folioview - portfolio page view state controller
//!
//! Command line front end: replays event scripts against page descriptions,
//! validates pages and manages the configuration.

use clap::{Parser, Subcommand};
use folioview::cli::{CliResult, ConfigArgs, SimulateArgs, ValidateArgs, VariantsArgs};
use folioview::config::Config;
use folioview::constants::APP_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Folioview - portfolio page view state controller
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay an event script against a page
    Simulate(SimulateArgs),
    /// Validate a page description
    Validate(ValidateArgs),
    /// List page variants
    Variants(VariantsArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = log_filter(verbose, || {
        Config::load()
            .map(|config| config.logging.level)
            .unwrap_or_else(|_| "info".to_string())
    });

    // Logs go to stderr so JSON output on stdout stays parseable.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// `--verbose` wins over `RUST_LOG`, which wins over the configured level.
fn log_filter(verbose: bool, configured: impl FnOnce() -> String) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured()))
}

fn run(command: &Commands) -> CliResult<()> {
    match command {
        Commands::Simulate(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::Variants(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    if let Err(error) = run(&cli.command) {
        eprintln!("Error: {error}");
        std::process::exit(error.exit_code().code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_environment_filter() {
        let filter = log_filter(true, || unreachable!("configured level not consulted"));
        assert_eq!(filter.to_string(), "debug");
    }
}
