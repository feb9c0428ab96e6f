//! # GenVar Common Library
//!
//! Shared code for the GenVar services:
//! - Error and result types
//! - Configuration loading (TOML file, environment, compiled defaults)
//! - rsID sanitization

pub mod config;
pub mod error;
pub mod rsid;

pub use error::{Error, Result};
pub use rsid::clean_rsid;
