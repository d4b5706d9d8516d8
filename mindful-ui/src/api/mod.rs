//! Backend access
//!
//! Typed wrappers over the companion service REST endpoints.

pub mod client;

pub use client::*;
