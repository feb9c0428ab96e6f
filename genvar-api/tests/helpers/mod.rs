//! Test Helper Utilities
//!
//! Shared utilities for testing genvar-api

// Each test binary uses a subset of these helpers
#![allow(dead_code)]

pub mod log_capture;
pub mod mock_ensembl;

pub use log_capture::LogCapture;
pub use mock_ensembl::{rs699_payload, spawn_upstream, geneless_payload};
