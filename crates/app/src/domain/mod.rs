//! Backend Services

pub mod addresses;
pub mod coupons;
pub mod menu;
pub mod orders;
pub mod payment;
pub mod profile;
pub mod reviews;
