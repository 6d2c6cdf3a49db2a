//! URL handling module for Sumi-Atlas
//!
//! This module provides base URL normalization, the admission filter that
//! decides which links are in scope, and the rule-based classifier that
//! derives category, priority and change frequency from a URL.

mod classify;
mod filter;
mod normalize;

// Re-export main functions
pub use classify::{path_segments, UrlClassifier};
pub use filter::AdmissionFilter;
pub use normalize::{normalize_base_url, site_root};
