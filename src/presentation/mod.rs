//! Presentation layer handling terminal UI and user input.
//!
//! This module renders published view snapshots using ratatui and turns
//! keyboard input into state machine operations.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
