//! Simulate command: replays an event script against a page description.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, PageVariant};
use crate::controller::{StateDiff, Update, ViewController, ViewEvent, ViewState};
use crate::dom::{Directive, DocumentModel, DomSink, ElementRef, Marker};
use crate::forms::FormField;
use crate::lightbox::LightboxView;
use crate::models::Page;
use crate::scheduler::Scheduler;
use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Replay an event script against a page description
#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Page description (JSON, JSON5 or TOML)
    #[arg(short, long, value_name = "FILE")]
    pub page: PathBuf,

    /// Event script (JSON or JSON5); defaults to document ready + window load
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Page variant preset (defaults to the configured one)
    #[arg(long, value_enum)]
    pub variant: Option<PageVariant>,

    /// Run every remaining deferred task after the script
    #[arg(long)]
    pub settle: bool,

    /// Include every step's directives and state diff
    #[arg(long)]
    pub timeline: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One script step: a host event, or a time advance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// Let `advance` milliseconds pass
    Advance {
        /// Milliseconds
        advance: u64,
    },
    /// Dispatch a host event
    Event(ViewEvent),
}

/// Loads a script file; `.json5` files are parsed as JSON5.
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script file: {}", path.display()))?;

    let is_json5 = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json5"));

    if is_json5 {
        json5::from_str(&content)
            .with_context(|| format!("Failed to parse JSON5 script: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON script: {}", path.display()))
    }
}

fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::Event(ViewEvent::DocumentReady),
        ScriptStep::Event(ViewEvent::WindowLoad),
    ]
}

#[derive(Debug, Serialize)]
struct TimelineEntry {
    step: usize,
    time_ms: u64,
    label: String,
    directives: Vec<Directive>,
    #[serde(skip_serializing_if = "StateDiff::is_empty")]
    diff: StateDiff,
}

#[derive(Debug, Serialize)]
struct FormErrorOutput {
    field: FormField,
    message: String,
}

#[derive(Debug, Serialize)]
struct DocumentSummary {
    active: Vec<ElementRef>,
    visible: Vec<ElementRef>,
    navbar_scrolled: bool,
    scroll_locked: bool,
    overlays: usize,
    scrolled_to: Vec<String>,
    navigations: Vec<String>,
    form_errors: Vec<FormErrorOutput>,
    trail_dots: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    typed_text: Option<String>,
}

impl DocumentSummary {
    fn from_document(document: &DocumentModel) -> Self {
        Self {
            active: document.elements_with(Marker::Active),
            visible: document.elements_with(Marker::Visible),
            navbar_scrolled: document.has_marker(ElementRef::Navbar, Marker::Scrolled),
            scroll_locked: document.is_scroll_locked(),
            overlays: document.overlay_count(),
            scrolled_to: document.scrolled_to().to_vec(),
            navigations: document.navigations().to_vec(),
            form_errors: document
                .form_errors()
                .into_iter()
                .map(|(field, message)| FormErrorOutput {
                    field,
                    message: message.to_string(),
                })
                .collect(),
            trail_dots: document.trail_len(),
            typed_text: document.text(ElementRef::TypewriterText).map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    variant: PageVariant,
    steps: usize,
    time_ms: u64,
    scroll_y: f64,
    state: ViewState,
    active_filter: String,
    menu_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    lightbox: Option<LightboxView>,
    document: DocumentSummary,
    pending_tasks: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    timeline: Vec<TimelineEntry>,
}

impl SimulateArgs {
    /// Execute the simulate command
    pub fn execute(&self) -> CliResult<()> {
        let page = load_page(&self.page)?;

        let script = match &self.script {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::io(format!(
                        "Script file not found: {}",
                        path.display()
                    )));
                }
                load_script(path).map_err(|e| CliError::validation(format!("{e:#}")))?
            }
            None => default_script(),
        };

        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let variant = self.variant.unwrap_or(config.page.variant);
        let controller_config = config.controller_config_for(variant);
        controller_config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid controller settings: {e:#}")))?;

        let report = simulate(page, controller_config, variant, &script, self.settle, self.timeline);

        if self.json {
            print_json(&report)
        } else {
            print_report(&report);
            Ok(())
        }
    }
}

/// Loads a page and rejects it when it has errors.
pub(crate) fn load_page(path: &Path) -> CliResult<Page> {
    if !path.exists() {
        return Err(CliError::io(format!(
            "Page file not found: {}",
            path.display()
        )));
    }

    let page = Page::load(path).map_err(|e| CliError::validation(format!("{e:#}")))?;
    let report = page.validate();
    if let Some(first) = report.errors.first() {
        return Err(CliError::validation(format!(
            "Invalid page ({} error(s)): {first}",
            report.errors.len()
        )));
    }
    Ok(page)
}

fn simulate(
    page: Page,
    config: crate::config::ControllerConfig,
    variant: PageVariant,
    script: &[ScriptStep],
    settle: bool,
    record_timeline: bool,
) -> SimulationReport {
    let mut controller = ViewController::new(page, config);
    let mut document = DocumentModel::new();
    let mut timeline = Vec::new();

    let mut record = |step: usize, time_ms: u64, label: String, update: Update| {
        document.apply_all(&update.directives);
        if record_timeline {
            timeline.push(TimelineEntry {
                step,
                time_ms,
                label,
                directives: update.directives,
                diff: update.diff,
            });
        }
    };

    for (index, step) in script.iter().enumerate() {
        let (label, update) = match step {
            ScriptStep::Advance { advance } => {
                (format!("advance {advance}ms"), controller.advance_time(*advance))
            }
            ScriptStep::Event(event) => (event_label(event), controller.dispatch(event.clone())),
        };
        debug!(step = index, %label, directives = update.directives.len(), "script step");
        record(index, controller.scheduler().now_ms(), label, update);
    }

    if settle {
        let update = controller.flush();
        record(script.len(), controller.scheduler().now_ms(), "settle".to_string(), update);
    }

    SimulationReport {
        variant,
        steps: script.len(),
        time_ms: controller.scheduler().now_ms(),
        scroll_y: controller.scroll_y(),
        state: controller.view_state(),
        active_filter: controller.active_filter().to_string(),
        menu_open: controller.menu().is_open(),
        lightbox: controller.lightbox().current().cloned(),
        document: DocumentSummary::from_document(&document),
        pending_tasks: controller.pending_tasks(),
        timeline,
    }
}

fn event_label(event: &ViewEvent) -> String {
    serde_json::to_string(event).unwrap_or_else(|_| format!("{event:?}"))
}

fn print_report(report: &SimulationReport) {
    println!("Variant:        {}", report.variant);
    println!("Steps:          {}", report.steps);
    println!("Time:           {} ms", report.time_ms);
    println!("Scroll:         {} px", report.scroll_y);
    println!(
        "Current:        {}",
        report.state.nav_active.as_deref().unwrap_or("(none)")
    );
    println!("Filter:         {}", report.active_filter);

    let indices = |flags: &[bool]| -> String {
        let list: Vec<String> = flags
            .iter()
            .enumerate()
            .filter(|(_, &flag)| flag)
            .map(|(index, _)| index.to_string())
            .collect();
        if list.is_empty() {
            "(none)".to_string()
        } else {
            list.join(", ")
        }
    };
    println!("Revealed items: {}", indices(&report.state.item_visible));
    println!("Shown items:    {}", indices(&report.state.item_shown));
    println!("Menu:           {}", if report.menu_open { "open" } else { "closed" });

    match &report.lightbox {
        Some(view) => println!("Lightbox:       open on item {} ({})", view.item_index, view.title),
        None => println!("Lightbox:       closed"),
    }
    if report.document.scroll_locked {
        println!("Scroll lock:    on");
    }
    if let Some(text) = &report.document.typed_text {
        println!("Typed:          {text}");
    }
    for url in &report.document.navigations {
        println!("Navigated:      {url}");
    }
    for error in &report.document.form_errors {
        println!("Form error:     {}", error.message);
    }
    if report.pending_tasks > 0 {
        println!("Pending tasks:  {}", report.pending_tasks);
    }

    if !report.timeline.is_empty() {
        println!("\nTimeline:");
        for entry in &report.timeline {
            println!(
                "  [{:>5} ms] #{} {} ({} directive(s))",
                entry.time_ms,
                entry.step,
                entry.label,
                entry.directives.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use crate::controller::ClickTarget;
    use crate::models::{FilterButton, GridItem};

    #[test]
    fn test_script_steps_parse() {
        let steps: Vec<ScriptStep> = serde_json::from_str(
            r#"[{"type": "document_ready"}, {"advance": 300}, {"type": "scroll", "y": 10}]"#,
        )
        .unwrap();
        assert_eq!(steps[1], ScriptStep::Advance { advance: 300 });
        assert_eq!(steps[2], ScriptStep::Event(ViewEvent::Scroll { y: 10.0 }));
    }

    #[test]
    fn test_json5_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json5");
        fs::write(&path, "[{type: 'window_load'}, {advance: 100}, // done\n]").unwrap();
        let steps = load_script(&path).unwrap();
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_simulate_filter_script() {
        let page = Page {
            filters: vec![FilterButton::new("all"), FilterButton::new("photo")],
            items: vec![GridItem::new("photo", "A"), GridItem::new("video", "B")],
            ..Page::default()
        };
        let script = vec![
            ScriptStep::Event(ViewEvent::Click {
                target: ClickTarget::FilterButton { index: 1 },
            }),
            ScriptStep::Advance { advance: 300 },
        ];

        let report = simulate(
            page,
            ControllerConfig::default(),
            PageVariant::Classic,
            &script,
            false,
            true,
        );
        assert_eq!(report.active_filter, "photo");
        assert_eq!(report.state.item_shown, vec![true, false]);
        assert_eq!(report.time_ms, 300);
        assert_eq!(report.pending_tasks, 0);
        assert_eq!(report.timeline.len(), 2);
        assert_eq!(report.document.active, vec![ElementRef::FilterButton(1)]);
    }
}
