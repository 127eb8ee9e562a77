pub mod catalog;
pub mod models;
pub mod order;
pub mod services;
pub mod errors;

pub use catalog::*;
pub use models::*;
pub use order::*;
pub use services::*;
pub use errors::*;
