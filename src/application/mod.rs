//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the stores and the form buffers the screens edit.

pub mod form;
pub mod state;

pub use form::*;
pub use state::*;
