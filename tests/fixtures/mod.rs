//! Shared test fixtures for controller scenarios and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use folioview::models::{
    FilterButton, GridItem, NavLink, Page, PageHooks, Rect, RevealTarget, Section, VideoHooks,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Three sections at 0, 800 and 1600 with matching nav links.
pub fn three_section_page() -> Page {
    Page {
        title: "Three sections".to_string(),
        sections: vec![
            Section::new("home", 0.0, 800.0),
            Section::new("work", 800.0, 800.0),
            Section::new("contact", 1600.0, 800.0),
        ],
        nav_links: vec![
            NavLink::new("#home"),
            NavLink::new("#work"),
            NavLink::new("#contact"),
        ],
        ..Page::default()
    }
}

/// A full portfolio page.
///
/// Five grid items in the work section, two of them photos:
///
/// | index | category | top  |
/// |-------|----------|------|
/// | 0     | photo    | 900  |
/// | 1     | video    | 900  |
/// | 2     | photo    | 1200 |
/// | 3     | design   | 1200 |
/// | 4     | video    | 1500 |
pub fn portfolio_page() -> Page {
    let item = |category: &str, title: &str, top: f64, left: f64| {
        GridItem::new(category, title)
            .with_description(format!("{title} description"))
            .with_image(format!("images/{}.jpg", title.to_lowercase()), title)
            .with_rect(Rect::new(top, left, 300.0, 250.0))
    };

    Page {
        title: "Portfolio".to_string(),
        filters: vec![
            FilterButton {
                tag: "all".into(),
                is_active: true,
            },
            FilterButton::new("photo"),
            FilterButton::new("video"),
            FilterButton::new("design"),
        ],
        items: vec![
            item("photo", "Portrait", 900.0, 0.0),
            item("video", "Reel", 900.0, 320.0),
            item("photo", "Landscape", 1200.0, 0.0),
            item("design", "Poster", 1200.0, 320.0),
            item("video", "Short", 1500.0, 0.0),
        ],
        reveal_targets: vec![RevealTarget::new("about-card", Rect::new(1700.0, 0.0, 600.0, 200.0))],
        hooks: PageHooks {
            hero: true,
            hero_background: true,
            gradient_orb: true,
            hero_image: true,
            hero_badge: true,
            hero_elements: vec!["title".to_string(), "subtitle".to_string(), "cta".to_string()],
            typewriter_text: Some("Hi!".to_string()),
            video: Some(VideoHooks::default()),
            ..PageHooks::default()
        },
        ..three_section_page()
    }
}

/// Writes `content` to `name` inside `dir`.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Writes `page` as JSON into a fresh temp dir.
pub fn temp_page_file(page: &Page) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let json = serde_json::to_string_pretty(page).expect("Failed to serialize page");
    let path = write_file(dir.path(), "page.json", &json);
    (dir, path)
}

/// Path to the folioview binary.
pub fn folioview_bin() -> &'static str {
    env!("CARGO_BIN_EXE_folioview")
}

/// Command with its config directory pointed at `config_dir`.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(folioview_bin());
    cmd.env("FOLIOVIEW_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}
