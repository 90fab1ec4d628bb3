//! empdir - Terminal Employee Directory Library
//!
//! A login-gated employee table with add, edit, delete and search, built on
//! ratatui.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::*;
