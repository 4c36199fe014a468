//! Independent single-pass scrapers over the raw log text.
//!
//! These deliberately read the raw text rather than the structured
//! entries: the lines of interest survive even when surrounding entries
//! are malformed or truncated.

mod enrollment;
mod network;

pub use enrollment::extract_enrollment;
pub use network::extract_network;
