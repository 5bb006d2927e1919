//! CLI command handlers.
//!
//! Headless, scriptable access to the view controller for automation,
//! testing and CI.

pub mod common;
pub mod config;
pub mod simulate;
pub mod validate;
pub mod variants;

pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use simulate::SimulateArgs;
pub use validate::ValidateArgs;
pub use variants::VariantsArgs;
