//! Validation command for page description files.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::Page;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate a page description for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Page description (JSON, JSON5 or TOML)
    #[arg(short, long, value_name = "FILE")]
    pub page: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct ValidationMessage {
    severity: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct PageCounts {
    sections: usize,
    nav_links: usize,
    filters: usize,
    items: usize,
    reveal_targets: usize,
}

#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
    counts: PageCounts,
    categories: Vec<String>,
    messages: Vec<ValidationMessage>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        if !self.page.exists() {
            return Err(CliError::io(format!(
                "Page file not found: {}",
                self.page.display()
            )));
        }
        let page = Page::load(&self.page)
            .map_err(|e| CliError::validation(format!("Failed to load page: {e:#}")))?;
        let report = page.validate();

        let messages: Vec<ValidationMessage> = report
            .errors
            .iter()
            .map(|message| ValidationMessage {
                severity: "error",
                message: message.clone(),
            })
            .chain(report.warnings.iter().map(|message| ValidationMessage {
                severity: "warning",
                message: message.clone(),
            }))
            .collect();

        let response = ValidationResponse {
            valid: report.is_valid(),
            counts: PageCounts {
                sections: page.sections.len(),
                nav_links: page.nav_links.len(),
                filters: page.filters.len(),
                items: page.items.len(),
                reveal_targets: page.reveal_targets.len(),
            },
            categories: page.categories().into_iter().map(str::to_string).collect(),
            messages,
        };

        if self.json {
            print_json(&response)?;
        } else {
            if response.valid {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            println!("\nPage:");
            println!("  Sections:       {}", response.counts.sections);
            println!("  Nav links:      {}", response.counts.nav_links);
            println!("  Filters:        {}", response.counts.filters);
            println!("  Grid items:     {}", response.counts.items);
            println!("  Reveal targets: {}", response.counts.reveal_targets);
            if !response.categories.is_empty() {
                println!("  Categories:     {}", response.categories.join(", "));
            }

            if !response.messages.is_empty() {
                println!("\nIssues:");
                for msg in &response.messages {
                    let prefix = if msg.severity == "error" { "  ✗" } else { "  ⚠" };
                    println!("{prefix} {}", msg.message);
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
