//! Document-space geometry: element rectangles, the viewport and root margins.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Axis-aligned rectangle in document coordinates (px, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    /// Distance from the top of the document
    pub top: f64,
    /// Distance from the left edge of the document
    pub left: f64,
    /// Width in px
    pub width: f64,
    /// Height in px
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Area in px².
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlapping rectangle, or `None` when the two do not touch.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom().min(other.bottom());
        let right = self.right().min(other.right());

        if bottom < top || right < left {
            return None;
        }

        Some(Self::new(top, left, right - left, bottom - top))
    }
}

/// Browser window dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner width (px)
    pub width: f64,
    /// Inner height (px)
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    /// The visible document region at the given scroll offset.
    #[must_use]
    pub fn rect_at(&self, scroll_y: f64) -> Rect {
        Rect::new(scroll_y, 0.0, self.width, self.height)
    }
}

/// Margin applied to the intersection root, in CSS shorthand order.
///
/// Positive values grow the root, negative values shrink it. Only pixel
/// lengths are accepted: `"0px 0px -100px 0px"`, `"10px"`, `"0 5px"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    /// Top margin (px)
    pub top: f64,
    /// Right margin (px)
    pub right: f64,
    /// Bottom margin (px)
    pub bottom: f64,
    /// Left margin (px)
    pub left: f64,
}

fn margin_token() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"^(-?\d+(?:\.\d+)?)(px)?$").unwrap())
}

impl RootMargin {
    /// Margin that only trims the bottom of the root.
    #[must_use]
    pub const fn bottom_inset(px: f64) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: -px,
            left: 0.0,
        }
    }

    /// Applies the margin to a root rectangle.
    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        let top = root.top - self.top;
        let left = root.left - self.left;
        let bottom = root.bottom() + self.bottom;
        let right = root.right() + self.right;
        Rect::new(top, left, (right - left).max(0.0), (bottom - top).max(0.0))
    }
}

impl FromStr for RootMargin {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split_whitespace()
            .map(|token| {
                let caps = margin_token()
                    .captures(token)
                    .with_context(|| format!("Invalid root margin length '{token}' (expected px)"))?;
                let number = &caps[1];
                // A bare number is only valid for zero, as in CSS.
                if caps.get(2).is_none() && number.parse::<f64>().unwrap_or(1.0) != 0.0 {
                    anyhow::bail!("Root margin length '{token}' is missing the px unit");
                }
                number
                    .parse::<f64>()
                    .with_context(|| format!("Invalid root margin number '{number}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => anyhow::bail!(
                "Root margin '{s}' must have between 1 and 4 values (got {})",
                values.len()
            ),
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap, Rect::new(50.0, 50.0, 50.0, 50.0));
        assert!((overlap.area() - 2500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_intersection_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_parse_four_values() {
        let margin: RootMargin = "0px 0px -100px 0px".parse().unwrap();
        assert_eq!(margin, RootMargin::bottom_inset(100.0));
    }

    #[test]
    fn test_parse_shorthand() {
        let margin: RootMargin = "10px".parse().unwrap();
        assert!((margin.left - 10.0).abs() < f64::EPSILON);

        let margin: RootMargin = "0 5px".parse().unwrap();
        assert!((margin.top).abs() < f64::EPSILON);
        assert!((margin.right - 5.0).abs() < f64::EPSILON);
        assert!((margin.left - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<RootMargin>().is_err());
        assert!("10%".parse::<RootMargin>().is_err());
        assert!("5".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<RootMargin>().is_err());
    }

    #[test]
    fn test_apply_shrinks_bottom() {
        let root = Viewport::default().rect_at(1000.0);
        let adjusted = RootMargin::bottom_inset(50.0).apply(root);
        assert!((adjusted.top - 1000.0).abs() < f64::EPSILON);
        assert!((adjusted.bottom() - 1750.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&RootMargin::bottom_inset(50.0)).unwrap();
        assert_eq!(json, "\"0px 0px -50px 0px\"");
        let back: RootMargin = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RootMargin::bottom_inset(50.0));
    }
}
