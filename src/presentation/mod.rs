//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the login screen and employee table with ratatui and
//! turns key presses into calls on the application state.

pub mod input;
pub mod ui;

pub use input::*;
pub use ui::*;
