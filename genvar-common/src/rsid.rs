//! rsID sanitization
//!
//! Identifiers arrive straight from the URL path, so they are normalized
//! (trimmed, lower-cased) and checked against `^rs\d+$` before any upstream call.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, Result};

static RSID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rs\d+$").expect("rsID pattern is a valid regex"));

/// Validate and normalize a reference SNP identifier
///
/// Strips surrounding whitespace and lower-cases the input, then requires
/// `rs` followed by one or more digits.
///
/// # Errors
/// Returns [`Error::InvalidInput`] when the normalized value does not match.
pub fn clean_rsid(raw: &str) -> Result<String> {
    let cleaned = raw.trim().to_lowercase();

    if !RSID_PATTERN.is_match(&cleaned) {
        return Err(Error::InvalidInput(format!(
            "Invalid rsID format: '{}'. Expected 'rs' followed by digits.",
            raw
        )));
    }

    Ok(cleaned)
}
