//! Configuration management for the application.
//!
//! Two layers live here:
//!
//! - [`ControllerConfig`]: every knob the view controller reads, with one
//!   preset per [`PageVariant`].
//! - [`Config`]: the user's persisted settings (chosen variant, timing
//!   overrides, log level), stored as TOML in the platform config directory.

use crate::constants::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_FILTER_HIDE_DELAY_MS, DEFAULT_REVEAL_THRESHOLD,
    DEFAULT_SCROLL_MARGIN, DEFAULT_SCROLL_THROTTLE_MS, HERO_STAGGER_MS, TYPEWRITER_SPEED_MS,
};
use crate::effects::{ParallaxLayer, ParallaxTarget, TypewriterConfig};
use crate::lightbox::{ItemClickBehavior, LightboxLayout};
use crate::models::RootMargin;
use crate::nav_menu::MenuBehavior;
use crate::services::{FilterOptions, RevealOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One of the portfolio page flavours.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PageVariant {
    /// Original layout: plain parallax, simple lightbox
    #[default]
    Classic,
    /// Second iteration: filters, detailed lightbox, navbar marker
    Modern,
    /// Creative layout: gallery lightbox, typewriter, mouse trail
    Creative,
    /// Bold layout: staggered filters, detail pages, locking menu
    Bold,
    /// Modern layout with a hero video
    Video,
}

impl PageVariant {
    /// Every variant, in presentation order.
    pub const ALL: [Self; 5] = [
        Self::Classic,
        Self::Modern,
        Self::Creative,
        Self::Bold,
        Self::Video,
    ];

    /// Lowercase name used in files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Creative => "creative",
            Self::Bold => "bold",
            Self::Video => "video",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Classic => "Plain hero parallax, simple image lightbox",
            Self::Modern => "Category filters, detailed lightbox, navbar scroll marker",
            Self::Creative => "Gallery lightbox, staggered reveal, typewriter, mouse trail",
            Self::Bold => "Staggered filters, detail pages, scroll-locking menu",
            Self::Video => "Modern layout with custom hero video controls",
        }
    }
}

impl fmt::Display for PageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(s.trim()))
            .with_context(|| {
                format!(
                    "Unknown page variant '{s}' (expected one of: {})",
                    Self::ALL.map(Self::name).join(", ")
                )
            })
    }
}

/// Everything the view controller reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Distance above a section's top at which it becomes current (px)
    pub scroll_margin: f64,
    /// Leading-edge throttle window for scroll recomputation (ms)
    pub scroll_throttle_ms: u64,
    /// Filter transition timing
    pub filter: FilterOptions,
    /// Intersection observer settings
    pub reveal: RevealOptions,
    /// Scroll offset past which the navbar gets its marker
    pub navbar_scrolled_offset: Option<f64>,
    /// Mobile menu behavior
    pub menu: MenuBehavior,
    /// Lightbox content layout
    pub lightbox_layout: LightboxLayout,
    /// Grid item click handling
    pub item_click: ItemClickBehavior,
    /// Ignore item clicks that land on the overlay icon strip
    pub ignore_overlay_icon_clicks: bool,
    /// Scroll-driven transforms
    pub parallax: Vec<ParallaxLayer>,
    /// Typewriter effect, if any
    pub typewriter: Option<TypewriterConfig>,
    /// Delay between hero elements on window load (ms)
    pub hero_stagger_ms: u64,
    /// Perspective entrance of the hero image wrapper
    pub hero_image_entrance: bool,
    /// Mouse trail
    pub mouse_trail: bool,
    /// Custom hero video controls
    pub video_controls: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::for_variant(PageVariant::default())
    }
}

impl ControllerConfig {
    /// The preset for a page variant.
    #[must_use]
    pub fn for_variant(variant: PageVariant) -> Self {
        let base = Self {
            scroll_margin: DEFAULT_SCROLL_MARGIN,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            filter: FilterOptions {
                show_delay_ms: 10,
                show_stagger: false,
                hide_delay_ms: DEFAULT_FILTER_HIDE_DELAY_MS,
            },
            reveal: RevealOptions {
                threshold: DEFAULT_REVEAL_THRESHOLD,
                root_margin: RootMargin::bottom_inset(50.0),
                stagger_ms: None,
            },
            navbar_scrolled_offset: None,
            menu: MenuBehavior::default(),
            lightbox_layout: LightboxLayout::Simple,
            item_click: ItemClickBehavior::Lightbox,
            ignore_overlay_icon_clicks: false,
            parallax: Vec::new(),
            typewriter: None,
            hero_stagger_ms: HERO_STAGGER_MS,
            hero_image_entrance: false,
            mouse_trail: false,
            video_controls: false,
        };

        match variant {
            PageVariant::Classic => Self {
                parallax: vec![ParallaxLayer::translate(ParallaxTarget::Hero, 0.5)],
                ..base
            },
            PageVariant::Modern | PageVariant::Video => Self {
                navbar_scrolled_offset: Some(50.0),
                lightbox_layout: LightboxLayout::Detailed,
                parallax: vec![ParallaxLayer::translate(ParallaxTarget::HeroImage, 0.3)
                    .with_scale(0.0005)
                    .first_screen_only()],
                video_controls: variant == PageVariant::Video,
                ..base
            },
            PageVariant::Creative => Self {
                filter: FilterOptions {
                    show_delay_ms: 100,
                    ..base.filter
                },
                reveal: RevealOptions {
                    stagger_ms: Some(100),
                    ..base.reveal
                },
                lightbox_layout: LightboxLayout::Gallery,
                ignore_overlay_icon_clicks: true,
                parallax: vec![
                    ParallaxLayer::translate(ParallaxTarget::Hero, 0.5),
                    ParallaxLayer::translate(ParallaxTarget::HeroBackground, 0.3)
                        .with_scale(0.0005),
                    ParallaxLayer::translate(ParallaxTarget::GradientOrb, 0.0).with_scale(0.0002),
                ],
                typewriter: Some(TypewriterConfig {
                    speed_ms: TYPEWRITER_SPEED_MS,
                    start_delay_ms: 0,
                }),
                mouse_trail: true,
                ..base
            },
            PageVariant::Bold => Self {
                filter: FilterOptions {
                    show_delay_ms: 100,
                    show_stagger: true,
                    ..base.filter
                },
                reveal: RevealOptions {
                    root_margin: RootMargin::bottom_inset(100.0),
                    stagger_ms: Some(100),
                    ..base.reveal
                },
                navbar_scrolled_offset: Some(100.0),
                menu: MenuBehavior {
                    lock_scroll: true,
                    close_on_outside_click: true,
                    close_on_escape: true,
                },
                item_click: ItemClickBehavior::Navigate {
                    routes: bold_routes(),
                    detail_page: "portfolio-detail.html".to_string(),
                },
                parallax: vec![
                    ParallaxLayer::translate(ParallaxTarget::HeroImage, 0.4)
                        .with_scale(0.0003)
                        .with_rotate_y(-5.0, 0.01)
                        .first_screen_only(),
                    ParallaxLayer::translate(ParallaxTarget::HeroBadge, 0.2)
                        .with_scale(0.0002)
                        .first_screen_only(),
                ],
                typewriter: Some(TypewriterConfig {
                    speed_ms: TYPEWRITER_SPEED_MS,
                    start_delay_ms: 1000,
                }),
                hero_image_entrance: true,
                ..base
            },
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.scroll_margin.is_finite() {
            anyhow::bail!("scroll_margin must be a finite number");
        }

        let threshold = self.reveal.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("reveal threshold must be between 0.0 and 1.0, got {threshold}");
        }

        if let ItemClickBehavior::Navigate { detail_page, .. } = &self.item_click {
            if detail_page.trim().is_empty() {
                anyhow::bail!("detail_page must not be empty when items navigate");
            }
        }

        if let Some(typewriter) = &self.typewriter {
            if typewriter.speed_ms == 0 {
                anyhow::bail!("typewriter speed_ms must be greater than zero");
            }
        }

        Ok(())
    }
}

fn bold_routes() -> BTreeMap<String, String> {
    [
        ("Visual Storytelling", "visual-storytelling.html"),
        ("Photo Storytelling", "photo-storytelling.html"),
        ("Corporate Event Coverage", "corporate-event-coverage.html"),
        (
            "Storytelling Trainings and Co-creation Sessions",
            "storytelling-trainings.html",
        ),
    ]
    .into_iter()
    .map(|(title, page)| (title.to_string(), page.to_string()))
    .collect()
}

/// Page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageConfig {
    /// Preset used when a command does not name one
    #[serde(default)]
    pub variant: PageVariant,
}

/// Optional overrides applied on top of the variant preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TimingOverrides {
    /// Scroll margin (px)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_margin: Option<f64>,
    /// Scroll throttle window (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_throttle_ms: Option<u64>,
    /// Filter fade-in delay (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_show_delay_ms: Option<u64>,
    /// Stagger the fade-in by item index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_show_stagger: Option<bool>,
    /// Filter layout removal delay (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_hide_delay_ms: Option<u64>,
    /// Reveal threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_threshold: Option<f64>,
    /// Reveal root margin (CSS shorthand)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_root_margin: Option<RootMargin>,
    /// Reveal stagger for grid items (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_stagger_ms: Option<u64>,
}

impl TimingOverrides {
    /// Applies the set fields to `config`.
    pub fn apply(&self, config: &mut ControllerConfig) {
        if let Some(margin) = self.scroll_margin {
            config.scroll_margin = margin;
        }
        if let Some(window) = self.scroll_throttle_ms {
            config.scroll_throttle_ms = window;
        }
        if let Some(delay) = self.filter_show_delay_ms {
            config.filter.show_delay_ms = delay;
        }
        if let Some(stagger) = self.filter_show_stagger {
            config.filter.show_stagger = stagger;
        }
        if let Some(delay) = self.filter_hide_delay_ms {
            config.filter.hide_delay_ms = delay;
        }
        if let Some(threshold) = self.reveal_threshold {
            config.reveal.threshold = threshold;
        }
        if let Some(margin) = self.reveal_root_margin {
            config.reveal.root_margin = margin;
        }
        if let Some(stagger) = self.reveal_stagger_ms {
            config.reveal.stagger_ms = Some(stagger);
        }
    }
}

/// Logging preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Keys accepted by [`Config::set`].
pub const SETTABLE_KEYS: &[&str] = &[
    "page.variant",
    "logging.level",
    "overrides.scroll_margin",
    "overrides.scroll_throttle_ms",
    "overrides.filter_show_delay_ms",
    "overrides.filter_show_stagger",
    "overrides.filter_hide_delay_ms",
    "overrides.reveal_threshold",
    "overrides.reveal_root_margin",
    "overrides.reveal_stagger_ms",
];

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Folioview/config.toml`
/// - macOS: `~/Library/Application Support/Folioview/config.toml`
/// - Windows: `%APPDATA%\Folioview\config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Page settings
    #[serde(default)]
    pub page: PageConfig,
    /// Timing overrides
    #[serde(default)]
    pub overrides: TimingOverrides,
    /// Logging preferences
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// `FOLIOVIEW_CONFIG_DIR` replaces it when set.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, defaulting when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves to `path` using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - the effective controller config for the chosen variant is valid
    /// - `logging.level` is not empty
    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            anyhow::bail!("logging.level must not be empty");
        }
        self.controller_config().validate()
    }

    /// Effective controller config for the configured variant.
    #[must_use]
    pub fn controller_config(&self) -> ControllerConfig {
        self.controller_config_for(self.page.variant)
    }

    /// Effective controller config for `variant`, overrides applied.
    #[must_use]
    pub fn controller_config_for(&self, variant: PageVariant) -> ControllerConfig {
        let mut config = ControllerConfig::for_variant(variant);
        self.overrides.apply(&mut config);
        config
    }

    /// Sets one value by dotted key, validating the result.
    ///
    /// On error the config is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        let overrides = &mut updated.overrides;

        match key {
            "page.variant" => updated.page.variant = value.parse()?,
            "logging.level" => updated.logging.level = value.trim().to_string(),
            "overrides.scroll_margin" => overrides.scroll_margin = Some(parse_value(key, value)?),
            "overrides.scroll_throttle_ms" => {
                overrides.scroll_throttle_ms = Some(parse_value(key, value)?);
            }
            "overrides.filter_show_delay_ms" => {
                overrides.filter_show_delay_ms = Some(parse_value(key, value)?);
            }
            "overrides.filter_show_stagger" => {
                overrides.filter_show_stagger = Some(parse_value(key, value)?);
            }
            "overrides.filter_hide_delay_ms" => {
                overrides.filter_hide_delay_ms = Some(parse_value(key, value)?);
            }
            "overrides.reveal_threshold" => {
                overrides.reveal_threshold = Some(parse_value(key, value)?);
            }
            "overrides.reveal_root_margin" => {
                overrides.reveal_root_margin = Some(value.parse()?);
            }
            "overrides.reveal_stagger_ms" => {
                overrides.reveal_stagger_ms = Some(parse_value(key, value)?);
            }
            _ => anyhow::bail!(
                "Unknown config key '{key}' (expected one of: {})",
                SETTABLE_KEYS.join(", ")
            ),
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value '{value}' for {key}"))
}
