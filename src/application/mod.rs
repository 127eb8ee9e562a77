//! Application layer managing state and storefront workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the cart, the order form and the UI mode in a single controller.

pub mod state;

pub use state::*;
