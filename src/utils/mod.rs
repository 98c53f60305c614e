//! Utilities Module
//!
//! Common utilities used across the crate.

pub mod crypto;
pub mod logging;
pub mod sanitize;
pub mod wallet_config;

pub use crypto::*;
