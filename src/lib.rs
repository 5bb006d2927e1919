//! Folioview Library
//!
//! A view state controller for single-page portfolio sites: scroll-driven
//! navigation highlighting, one-shot scroll reveal and a two-phase category
//! filter, plus the lightbox, mobile menu, video controls, decorative
//! effects and contact form checks around them.
//!
//! The controller never touches a real document. It consumes [`ViewEvent`]s
//! and returns [`dom::Directive`]s for a host to apply; deferred work runs
//! through a [`scheduler::Scheduler`].
//!
//! [`ViewEvent`]: controller::ViewEvent

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod controller;
pub mod dom;
pub mod effects;
pub mod forms;
pub mod lightbox;
pub mod models;
pub mod nav_menu;
pub mod scheduler;
pub mod services;
pub mod shortcuts;
pub mod video;

pub use controller::{Update, ViewController, ViewEvent};
