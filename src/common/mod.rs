//! Common types and utilities shared across mindex.
//!
//! This module contains:
//! - Configuration (minimum degree and the capacity bounds it implies)
//! - Error types

pub mod config;
pub mod error;

pub use config::BTreeConfig;
pub use error::{Error, Result};
