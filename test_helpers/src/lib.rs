//! Test helpers shared across the workspace crates.
//!
//! [`env`] serialises process environment mutation behind restoring guards,
//! and [`figment`] wraps `figment::Jail` for configuration tests.

pub mod env;
pub mod figment;
