//! Utility modules

pub mod http_retry;
pub mod rotating_file;

pub use http_retry::{retry_transient, RetryPolicy};
pub use rotating_file::RotatingFile;
