use crate::record::{today, Category, ChangeFrequency, Origin, Priority, UrlRecord};
use url::Url;

/// Facts about a URL that classification rules inspect
struct UrlFacts<'a> {
    /// True when the URL is the base URL or the base URL plus `/`
    is_base: bool,
    /// Lowercased full URL
    lowered: String,
    /// URL path as parsed (percent-encoded)
    path: &'a str,
    segments: &'a [String],
}

/// One classification rule: a predicate and the metadata it assigns
struct Rule {
    matches: fn(&UrlFacts<'_>) -> bool,
    category: Category,
    priority: Priority,
    change_frequency: ChangeFrequency,
}

/// Classification rules, evaluated in order; the first match wins.
///
/// The order is part of the contract: an `/about` page is `About` even
/// though it also has exactly one path segment, and `/privacy` only reaches
/// the legal rule because the single-segment rule excludes it.
const RULES: &[Rule] = &[
    Rule {
        matches: is_homepage,
        category: Category::Homepage,
        priority: Priority::fixed(1.0),
        change_frequency: ChangeFrequency::Daily,
    },
    Rule {
        matches: is_contact,
        category: Category::Contact,
        priority: Priority::fixed(0.8),
        change_frequency: ChangeFrequency::Weekly,
    },
    Rule {
        matches: is_about,
        category: Category::About,
        priority: Priority::fixed(0.8),
        change_frequency: ChangeFrequency::Weekly,
    },
    Rule {
        matches: is_article,
        category: Category::Articles,
        priority: Priority::fixed(0.8),
        change_frequency: ChangeFrequency::Daily,
    },
    Rule {
        matches: is_main_category,
        category: Category::MainCategories,
        priority: Priority::fixed(0.9),
        change_frequency: ChangeFrequency::Daily,
    },
    Rule {
        matches: is_subcategory,
        category: Category::Subcategories,
        priority: Priority::fixed(0.7),
        change_frequency: ChangeFrequency::Weekly,
    },
    Rule {
        matches: is_deep_content,
        category: Category::DeepContent,
        priority: Priority::fixed(0.6),
        change_frequency: ChangeFrequency::Monthly,
    },
    Rule {
        matches: is_legal,
        category: Category::Legal,
        priority: Priority::fixed(0.3),
        change_frequency: ChangeFrequency::Yearly,
    },
];

const CONTACT_TERMS: &[&str] = &["/contact", "/connect", "/get-in-touch"];
const ABOUT_TERMS: &[&str] = &["/about", "/about-us", "/company"];
const ARTICLE_PATTERNS: &[&str] = &["/article/", "/news/", "/blog/", "/post/", "/story/"];
const NON_CATEGORY_SEGMENTS: &[&str] = &["about", "contact", "privacy", "terms"];
const LEGAL_TERMS: &[&str] = &["/privacy", "/terms", "/policy", "/disclaimer"];

fn is_homepage(facts: &UrlFacts<'_>) -> bool {
    facts.is_base
}

fn is_contact(facts: &UrlFacts<'_>) -> bool {
    CONTACT_TERMS.iter().any(|t| facts.path.contains(t))
}

fn is_about(facts: &UrlFacts<'_>) -> bool {
    ABOUT_TERMS.iter().any(|t| facts.path.contains(t))
}

fn is_article(facts: &UrlFacts<'_>) -> bool {
    ARTICLE_PATTERNS.iter().any(|p| facts.lowered.contains(p))
}

fn is_main_category(facts: &UrlFacts<'_>) -> bool {
    facts.segments.len() == 1 && !NON_CATEGORY_SEGMENTS.contains(&facts.segments[0].as_str())
}

fn is_subcategory(facts: &UrlFacts<'_>) -> bool {
    facts.segments.len() == 2
}

fn is_deep_content(facts: &UrlFacts<'_>) -> bool {
    facts.segments.len() >= 3
}

fn is_legal(facts: &UrlFacts<'_>) -> bool {
    LEGAL_TERMS.iter().any(|t| facts.path.contains(t))
}

/// Splits a URL path into its non-empty segments
pub fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rule-based URL classifier
///
/// Classification is a pure function of the URL (for a fixed base URL): the
/// same location always yields the same category, priority and change
/// frequency, whichever source discovered it.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    base: String,
    root: String,
}

impl UrlClassifier {
    /// Creates a classifier for a normalized base URL (no trailing slash)
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let root = format!("{}/", base);
        Self { base, root }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Classifies a URL into a record with the given provenance
    ///
    /// Never fails: a URL that cannot be parsed yields a fallback record with
    /// category `other`, priority `0.5`, no path segments and origin
    /// `error_fallback`.
    pub fn classify(&self, url: &str, origin: Origin) -> UrlRecord {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Error analyzing URL {}: {}", url, e);
                return Self::fallback(url);
            }
        };

        let path = parsed.path();
        let segments = path_segments(path);
        let facts = UrlFacts {
            is_base: url == self.base || url == self.root,
            lowered: url.to_lowercase(),
            path,
            segments: &segments,
        };

        let (category, priority, change_frequency) = RULES
            .iter()
            .find(|rule| (rule.matches)(&facts))
            .map(|rule| (rule.category, rule.priority, rule.change_frequency))
            .unwrap_or((Category::Other, Priority::DEFAULT, ChangeFrequency::Weekly));

        UrlRecord {
            location: url.to_string(),
            path: path.to_string(),
            path_segments: segments,
            last_modified: today(),
            change_frequency,
            priority,
            category,
            origin,
        }
    }

    fn fallback(url: &str) -> UrlRecord {
        UrlRecord {
            location: url.to_string(),
            path: "/".to_string(),
            path_segments: Vec::new(),
            last_modified: today(),
            change_frequency: ChangeFrequency::Weekly,
            priority: Priority::DEFAULT,
            category: Category::Other,
            origin: Origin::ErrorFallback,
        }
    }
}
