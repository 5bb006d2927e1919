//! Static page description: everything the controller discovers at load time.
//!
//! A page file lists the structural hooks of one portfolio page (sections,
//! nav links, filter buttons, grid items, reveal targets, optional hero and
//! video elements). It can be written as JSON, JSON5 or TOML.

use crate::models::{FilterButton, GridItem, NavLink, RevealTarget, Section, Viewport};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Optional video elements present on the page.
///
/// Every flag defaults to `true`; a page that lacks one of the controls
/// sets it to `false` and the matching UI updates become no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoHooks {
    /// Poster image layered over the video
    #[serde(default = "default_true")]
    pub poster: bool,
    /// Big centered play button
    #[serde(default = "default_true")]
    pub play_button: bool,
    /// Play/pause control in the control bar
    #[serde(default = "default_true")]
    pub play_pause_button: bool,
    /// Mute control
    #[serde(default = "default_true")]
    pub mute_button: bool,
    /// Fullscreen control
    #[serde(default = "default_true")]
    pub fullscreen_button: bool,
    /// The video element starts muted
    #[serde(default)]
    pub muted: bool,
}

impl Default for VideoHooks {
    fn default() -> Self {
        Self {
            poster: true,
            play_button: true,
            play_pause_button: true,
            mute_button: true,
            fullscreen_button: true,
            muted: false,
        }
    }
}

/// Optional page hooks outside the navigation/grid core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHooks {
    /// Hamburger toggle and collapsible menu
    #[serde(default = "default_true")]
    pub menu_toggle: bool,
    /// Fixed navbar that gets a `scrolled` marker
    #[serde(default = "default_true")]
    pub navbar: bool,
    /// Hero section targeted by the plain parallax
    #[serde(default)]
    pub hero: bool,
    /// Animated hero background layer
    #[serde(default)]
    pub hero_background: bool,
    /// Gradient orb behind the hero
    #[serde(default)]
    pub gradient_orb: bool,
    /// Hero image targeted by parallax
    #[serde(default)]
    pub hero_image: bool,
    /// Hero badge targeted by parallax and the typewriter
    #[serde(default)]
    pub hero_badge: bool,
    /// Ids of hero elements animated in on window load, in order
    #[serde(default)]
    pub hero_elements: Vec<String>,
    /// Text typed out by the typewriter effect
    #[serde(default)]
    pub typewriter_text: Option<String>,
    /// Hero video with custom controls
    #[serde(default)]
    pub video: Option<VideoHooks>,
}

impl Default for PageHooks {
    fn default() -> Self {
        Self {
            menu_toggle: true,
            navbar: true,
            hero: false,
            hero_background: false,
            gradient_orb: false,
            hero_image: false,
            hero_badge: false,
            hero_elements: Vec::new(),
            typewriter_text: None,
            video: None,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// A complete page description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Page {
    /// Human readable page name
    #[serde(default)]
    pub title: String,
    /// Window dimensions
    #[serde(default)]
    pub viewport: Viewport,
    /// Navigable sections in document order
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Navigation links in document order
    #[serde(default)]
    pub nav_links: Vec<NavLink>,
    /// Filter buttons in document order
    #[serde(default)]
    pub filters: Vec<FilterButton>,
    /// Portfolio grid items in document order
    #[serde(default)]
    pub items: Vec<GridItem>,
    /// Other scroll-reveal elements
    #[serde(default)]
    pub reveal_targets: Vec<RevealTarget>,
    /// Optional elements
    #[serde(default)]
    pub hooks: PageHooks,
}

/// Result of [`Page::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageReport {
    /// Problems that make the page unusable
    pub errors: Vec<String>,
    /// Suspicious but tolerated markup
    pub warnings: Vec<String>,
}

impl PageReport {
    /// True when there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Page {
    /// Loads a page description, picking the format from the file extension.
    ///
    /// `.toml` is parsed as TOML, `.json5` as JSON5 and anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let page: Self = match extension.as_str() {
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML page: {}", path.display()))?,
            "json5" => json5::from_str(&content)
                .with_context(|| format!("Failed to parse JSON5 page: {}", path.display()))?,
            _ => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON page: {}", path.display()))?,
        };

        Ok(page)
    }

    /// Section with the given id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Distinct item categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| item.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Checks the description for structural problems.
    ///
    /// Errors:
    /// - empty or duplicate section ids
    /// - non-finite offsets or sizes
    /// - grid items without a category
    /// - empty or duplicate reveal target ids
    ///
    /// Warnings:
    /// - sections whose offsets are not increasing (document order wins)
    /// - anchor links to sections that do not exist
    /// - filter tags that match no item
    /// - more than one filter button marked active
    #[must_use]
    pub fn validate(&self) -> PageReport {
        let mut report = PageReport::default();

        let mut section_ids = HashSet::new();
        for (index, section) in self.sections.iter().enumerate() {
            if section.id.is_empty() {
                report.errors.push(format!("Section {index} has an empty id"));
            } else if !section_ids.insert(section.id.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate section id '{}'", section.id));
            }

            if !section.top_offset.is_finite() || !section.height.is_finite() {
                report.errors.push(format!(
                    "Section '{}' has a non-finite offset or height",
                    section.id
                ));
            }
        }

        for pair in self.sections.windows(2) {
            if pair[1].top_offset < pair[0].top_offset {
                report.warnings.push(format!(
                    "Section '{}' sits above '{}' but comes later in the document; it wins ties",
                    pair[1].id, pair[0].id
                ));
            }
        }

        for link in &self.nav_links {
            if link.is_anchor() && !link.target_id().is_empty() && self.section(link.target_id()).is_none()
            {
                report.warnings.push(format!(
                    "Nav link '{}' points at a missing section",
                    link.href
                ));
            }
        }

        for (index, item) in self.items.iter().enumerate() {
            if item.category.is_empty() {
                report
                    .errors
                    .push(format!("Grid item {index} ('{}') has no category", item.title));
            }
            if !item.rect.top.is_finite() || !item.rect.height.is_finite() {
                report
                    .errors
                    .push(format!("Grid item {index} has a non-finite rect"));
            }
        }

        let categories: HashSet<&str> = self.categories().into_iter().collect();
        for button in &self.filters {
            if let crate::models::Filter::Category(tag) = &button.tag {
                if !categories.contains(tag.as_str()) {
                    report
                        .warnings
                        .push(format!("Filter '{tag}' matches no grid item"));
                }
            }
        }

        if self.filters.iter().filter(|button| button.is_active).count() > 1 {
            report
                .warnings
                .push("More than one filter button is marked active".to_string());
        }

        let mut target_ids = HashSet::new();
        for target in &self.reveal_targets {
            if target.id.is_empty() {
                report
                    .errors
                    .push("Reveal target with an empty id".to_string());
            } else if !target_ids.insert(target.id.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate reveal target id '{}'", target.id));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Filter, Rect};
    use tempfile::TempDir;

    fn sample_page() -> Page {
        Page {
            title: "Sample".to_string(),
            sections: vec![
                Section::new("home", 0.0, 800.0),
                Section::new("work", 800.0, 1200.0),
            ],
            nav_links: vec![NavLink::new("#home"), NavLink::new("#work")],
            filters: vec![FilterButton::new("all"), FilterButton::new("photo")],
            items: vec![
                GridItem::new("photo", "Portrait").with_rect(Rect::new(900.0, 0.0, 300.0, 200.0)),
                GridItem::new("video", "Reel").with_rect(Rect::new(900.0, 320.0, 300.0, 200.0)),
            ],
            ..Page::default()
        }
    }

    #[test]
    fn test_validate_clean_page() {
        let report = sample_page().validate();
        assert!(report.is_valid());
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn test_validate_duplicate_section() {
        let mut page = sample_page();
        page.sections.push(Section::new("work", 2000.0, 100.0));
        let report = page.validate();
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("Duplicate section id"));
    }

    #[test]
    fn test_validate_warns_on_out_of_order_sections() {
        let mut page = sample_page();
        page.sections.push(Section::new("early", 100.0, 50.0));
        let report = page.validate();
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.contains("'early'")));
    }

    #[test]
    fn test_validate_unmatched_filter_and_missing_anchor() {
        let mut page = sample_page();
        page.filters.push(FilterButton::new("design"));
        page.nav_links.push(NavLink::new("#contact"));
        let report = page.validate();
        assert!(report.warnings.iter().any(|w| w.contains("design")));
        assert!(report.warnings.iter().any(|w| w.contains("#contact")));
    }

    #[test]
    fn test_categories_first_seen_order() {
        let mut page = sample_page();
        page.items.push(GridItem::new("photo", "Landscape"));
        assert_eq!(page.categories(), vec!["photo", "video"]);
    }

    #[test]
    fn test_load_json_and_toml() {
        let temp_dir = TempDir::new().unwrap();
        let page = sample_page();

        let json_path = temp_dir.path().join("page.json");
        fs::write(&json_path, serde_json::to_string_pretty(&page).unwrap()).unwrap();
        let loaded = Page::load(&json_path).unwrap();
        assert_eq!(loaded.sections.len(), 2);
        assert_eq!(loaded.filters[1].tag, Filter::from("photo"));

        let toml_path = temp_dir.path().join("page.toml");
        fs::write(
            &toml_path,
            r#"
title = "Toml page"

[[sections]]
id = "home"
top_offset = 0.0

[[items]]
category = "photo"
title = "Portrait"
"#,
        )
        .unwrap();
        let loaded = Page::load(&toml_path).unwrap();
        assert_eq!(loaded.title, "Toml page");
        assert!(loaded.items[0].is_shown);
        assert!(loaded.hooks.menu_toggle);
    }

    #[test]
    fn test_load_json5_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("page.json5");
        fs::write(
            &path,
            "{\n  // hero first\n  sections: [{ id: 'home', top_offset: 0.0 }],\n}\n",
        )
        .unwrap();
        let loaded = Page::load(&path).unwrap();
        assert_eq!(loaded.sections[0].id, "home");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Page::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read page file"));
    }
}
