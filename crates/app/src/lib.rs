//! Storefront client: backend services, session and checkout flows.

pub mod auth;
pub mod checkout;
pub mod config;
pub mod context;
pub mod domain;
pub mod http;
pub mod observability;
pub mod orders;

#[cfg(test)]
mod test;
