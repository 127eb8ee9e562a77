//! farmstand - Terminal Farm Storefront Library
//!
//! A terminal storefront for a small farm: browse the product catalog,
//! collect items in a cart and place an order, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
