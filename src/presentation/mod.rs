//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui,
//! maps key presses onto application operations, and renders the
//! storefront, the order panel and popups.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
