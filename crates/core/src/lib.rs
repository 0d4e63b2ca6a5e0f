//! Tiffin
//!
//! Domain model of the Tiffin storefront: menu, cart, coupons, orders,
//! addresses, local storage, view routing and page state. Nothing in this
//! crate talks to the network.

pub mod addresses;
pub mod amount;
pub mod cart;
pub mod coupons;
pub mod menu;
pub mod orders;
pub mod page;
pub mod prelude;
pub mod profile;
pub mod receipt;
pub mod routes;
pub mod storage;
