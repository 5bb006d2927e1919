//! Data models for portfolio pages: sections, links, grid items and filters.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of the host document and of controller logic.

pub mod filter;
pub mod geometry;
pub mod item;
pub mod page;
pub mod section;

// Re-export all model types
pub use filter::{Filter, FilterButton, FilterState};
pub use geometry::{Rect, RootMargin, Viewport};
pub use item::{GridItem, ImageRef, RevealTarget};
pub use page::{Page, PageHooks, PageReport, VideoHooks};
pub use section::{NavLink, Section};
