//! # ABMD Common Library
//!
//! Shared code for the audiobook metadata crates:
//! - Common error type
//! - TOML configuration loading and resolution
//! - Human-readable duration formatting

pub mod config;
pub mod error;
pub mod human_time;

pub use error::{Error, Result};
