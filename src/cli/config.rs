//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, SETTABLE_KEYS};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set one configuration value
    Set(ConfigSetArgs),
    /// Print the config file location
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set one configuration value
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Dotted key, e.g. `page.variant` or `overrides.filter_hide_delay_ms`
    #[arg(value_name = "KEY")]
    key: String,

    /// New value
    #[arg(value_name = "VALUE")]
    value: String,
}

#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    path: String,
    exists: bool,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let path = Config::config_file_path()
            .map(|path| path.display().to_string())
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        if self.json {
            return print_json(&ConfigOutput {
                path,
                exists: Config::exists(),
                config: &config,
            });
        }

        println!("Folioview Configuration");
        println!("=======================");
        println!();
        println!("File: {path}");
        println!();
        println!("Page:");
        println!("  Variant: {}", config.page.variant);
        println!();
        println!("Logging:");
        println!("  Level: {}", config.logging.level);
        println!();

        let overrides = toml::to_string_pretty(&config.overrides)
            .map_err(|e| CliError::io(format!("Failed to serialize overrides: {e}")))?;
        println!("Overrides:");
        if overrides.trim().is_empty() {
            println!("  (none)");
        } else {
            for line in overrides.lines() {
                println!("  {line}");
            }
        }
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if !SETTABLE_KEYS.contains(&self.key.as_str()) {
            return Err(CliError::validation(format!(
                "Unknown config key '{}'. Settable keys: {}",
                self.key,
                SETTABLE_KEYS.join(", ")
            )));
        }

        let mut config = Config::load().unwrap_or_default();
        config
            .set(&self.key, &self.value)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}
