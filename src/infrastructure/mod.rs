//! Infrastructure layer providing external service integrations.
//!
//! This module contains the file-backed order journal and the settings
//! loader.

pub mod config;
pub mod order_journal;

pub use config::*;
pub use order_journal::*;
