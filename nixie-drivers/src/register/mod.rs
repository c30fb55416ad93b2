//! Register bank implementations

pub mod hv513;

pub use hv513::{Hv513Bank, Hv513Error};
