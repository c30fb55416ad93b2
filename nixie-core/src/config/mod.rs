//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware embeds them as
//! postcard binary data produced from `clock.toml` at build time.

pub mod types;

pub use types::*;
