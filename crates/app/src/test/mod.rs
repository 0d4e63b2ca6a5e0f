//! Shared test fixtures.

mod helpers;

pub(crate) use helpers::*;
