/// Derived metadata attached to every discovered URL
///
/// This module defines the category, change frequency and priority values a
/// URL record can carry, together with their sitemap text representations.
use std::fmt;

/// Content category assigned by the URL classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// The site root
    Homepage,
    /// Contact / get-in-touch pages
    Contact,
    /// About / company pages
    About,
    /// Article, news, blog, post and story pages
    Articles,
    /// First-level directories
    MainCategories,
    /// Second-level pages
    Subcategories,
    /// Pages three or more levels deep
    DeepContent,
    /// Privacy, terms, policy and disclaimer pages
    Legal,
    /// Anything no rule matched
    Other,
}

impl Category {
    /// Every category, in classifier rule order
    pub const ALL: [Category; 9] = [
        Self::Homepage,
        Self::Contact,
        Self::About,
        Self::Articles,
        Self::MainCategories,
        Self::Subcategories,
        Self::DeepContent,
        Self::Legal,
        Self::Other,
    ];

    /// Returns the name used for grouping, filenames and the report
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::Contact => "contact",
            Self::About => "about",
            Self::Articles => "articles",
            Self::MainCategories => "main_categories",
            Self::Subcategories => "subcategories",
            Self::DeepContent => "deep_content",
            Self::Legal => "legal",
            Self::Other => "other",
        }
    }

    /// Parses a category from its name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How frequently a page is expected to change (sitemaps protocol `<changefreq>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }

    /// Parses a change frequency, ignoring case and surrounding whitespace
    ///
    /// Returns None for anything outside the seven protocol values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Some(Self::Always),
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sitemap priority, always within `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(f64);

impl Priority {
    pub const DEFAULT: Priority = Priority(0.5);

    /// Builds a priority from a constant known to be in range
    pub(crate) const fn fixed(value: f64) -> Self {
        Self(value)
    }

    /// Creates a priority, rejecting NaN and values outside `[0.0, 1.0]`
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Parses a priority from sitemap text
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<f64>().ok().and_then(Self::new)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Priority {
    /// Formats with up to three decimal places and at least one
    /// (`1.0`, `0.85`, `0.333`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:.3}", self.0);
        let trimmed = text.trim_end_matches('0');
        if trimmed.ends_with('.') {
            write!(f, "{}0", trimmed)
        } else {
            f.write_str(trimmed)
        }
    }
}
