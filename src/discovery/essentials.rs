//! Essential URL generation
//!
//! Every site is expected to have a handful of standard pages (home, about,
//! contact, legal, news). They are generated from a path list and, when
//! verification is on, kept only if another source found them or they
//! answer a fetch.

use crate::crawler::Fetcher;
use crate::record::{Origin, UrlRecord};
use crate::url::UrlClassifier;
use std::collections::HashSet;

/// Paths generated for every site unless configured otherwise
pub const DEFAULT_ESSENTIAL_PATHS: &[&str] = &[
    "/",
    "/home",
    "/index",
    "/about",
    "/about-us",
    "/contact",
    "/contact-us",
    "/privacy",
    "/privacy-policy",
    "/terms",
    "/terms-of-service",
    "/news",
    "/blog",
    "/articles",
];

/// Builds one record per essential path, with origin `Generated`
pub fn generate_essentials(classifier: &UrlClassifier, paths: &[String]) -> Vec<UrlRecord> {
    paths
        .iter()
        .map(|path| {
            let url = format!("{}{}", classifier.base(), path);
            classifier.classify(&url, Origin::Generated)
        })
        .collect()
}

/// Keeps the essentials that are already known or that answer a fetch
///
/// Known essentials are not fetched again.
pub async fn verify_essentials(
    fetcher: &dyn Fetcher,
    essentials: &[UrlRecord],
    known: &HashSet<&str>,
) -> Vec<UrlRecord> {
    let mut verified = Vec::new();

    for record in essentials {
        if known.contains(record.location.as_str()) {
            verified.push(record.clone());
            continue;
        }

        if fetcher.fetch(&record.location).await.is_some() {
            tracing::debug!("Essential URL reachable: {}", record.location);
            verified.push(record.clone());
        } else {
            tracing::debug!("Essential URL not reachable, leaving out: {}", record.location);
        }
    }

    verified
}
