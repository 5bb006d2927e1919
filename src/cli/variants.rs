//! Lists the page variant presets.

use crate::cli::common::{print_json, CliResult};
use crate::config::{ControllerConfig, PageVariant};
use clap::Args;
use serde::Serialize;

/// List page variants and their controller presets
#[derive(Debug, Clone, Args)]
pub struct VariantsArgs {
    /// Show the full preset of one variant
    #[arg(long, value_enum)]
    pub show: Option<PageVariant>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct VariantOutput {
    name: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    preset: Option<ControllerConfig>,
}

impl VariantsArgs {
    /// Execute the variants command
    pub fn execute(&self) -> CliResult<()> {
        let variants: Vec<VariantOutput> = PageVariant::ALL
            .into_iter()
            .filter(|variant| self.show.map_or(true, |shown| shown == *variant))
            .map(|variant| VariantOutput {
                name: variant.name(),
                description: variant.description(),
                preset: self
                    .show
                    .map(|_| ControllerConfig::for_variant(variant)),
            })
            .collect();

        if self.json {
            return print_json(&variants);
        }

        for variant in &variants {
            println!("{:<10} {}", variant.name, variant.description);
            if let Some(preset) = &variant.preset {
                print_preset(preset);
            }
        }
        Ok(())
    }
}

fn print_preset(preset: &ControllerConfig) {
    let on_off = |flag: bool| if flag { "on" } else { "off" };

    println!();
    println!("  Scroll margin:     {} px", preset.scroll_margin);
    println!("  Scroll throttle:   {} ms", preset.scroll_throttle_ms);
    println!(
        "  Filter:            show after {} ms{}, hide after {} ms",
        preset.filter.show_delay_ms,
        if preset.filter.show_stagger { " x index" } else { "" },
        preset.filter.hide_delay_ms
    );
    println!(
        "  Reveal:            threshold {}, root margin {}",
        preset.reveal.threshold, preset.reveal.root_margin
    );
    if let Some(stagger) = preset.reveal.stagger_ms {
        println!("  Reveal stagger:    {stagger} ms");
    }
    if let Some(offset) = preset.navbar_scrolled_offset {
        println!("  Navbar marker:     past {offset} px");
    }
    println!("  Lightbox layout:   {:?}", preset.lightbox_layout);
    println!("  Parallax layers:   {}", preset.parallax.len());
    if let Some(typewriter) = preset.typewriter {
        println!(
            "  Typewriter:        {} ms/char after {} ms",
            typewriter.speed_ms, typewriter.start_delay_ms
        );
    }
    println!("  Menu scroll lock:  {}", on_off(preset.menu.lock_scroll));
    println!("  Mouse trail:       {}", on_off(preset.mouse_trail));
    println!("  Video controls:    {}", on_off(preset.video_controls));
}
