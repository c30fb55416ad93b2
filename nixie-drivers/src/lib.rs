//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in nixie-core:
//!
//! - Register banks (HV513 high-voltage shift register chain)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod register;
