//! Infrastructure layer providing external service integrations.
//!
//! Configuration, the embedded seed data, CSV export and clipboard access
//! live here so the domain layer stays free of I/O.

pub mod clipboard;
pub mod config;
pub mod errors;
pub mod export;
pub mod seed;

pub use clipboard::*;
pub use config::*;
pub use errors::*;
pub use export::*;
pub use seed::*;
