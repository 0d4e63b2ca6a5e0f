//! Authentication

mod models;
mod service;
mod store;
mod token;

pub use models::*;
pub use service::*;
pub use store::AuthStore;
pub use token::*;
