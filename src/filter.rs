use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// File extensions that never carry page content
static ASSET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|png|gif|css|js|ico|svg|woff|woff2)$")
        .expect("asset pattern is valid")
});

static PDF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.pdf$").expect("pdf pattern is valid"));

/// What a URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Html,
    Pdf,
    Asset,
}

/// Classify a URL by the extension of its path.
///
/// Trailing slashes are ignored, so `report.pdf/` still classifies as a PDF.
pub fn classify(url: &str) -> UrlKind {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let path = path.trim_end_matches('/');

    if PDF_PATTERN.is_match(path) {
        UrlKind::Pdf
    } else if ASSET_PATTERN.is_match(path) {
        UrlKind::Asset
    } else {
        UrlKind::Html
    }
}

/// Normalize a URL for deduplication: HTML URLs lose trailing slashes,
/// everything else is kept exactly as given.
pub fn normalize_url(url: &str, kind: UrlKind) -> String {
    match kind {
        UrlKind::Pdf => url.to_string(),
        UrlKind::Html | UrlKind::Asset => url.trim_end_matches('/').to_string(),
    }
}

/// Decides which discovered URLs belong to the crawl
#[derive(Debug)]
pub struct UrlFilter {
    domain: String,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a filter that keeps URLs on `domain`
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            include_regexes: Vec::new(),
            exclude_regexes: Vec::new(),
        }
    }

    /// Add include and exclude regex patterns on top of the domain check
    pub fn with_patterns(
        mut self,
        include_patterns: &[String],
        exclude_patterns: &[String],
    ) -> Result<Self, regex::Error> {
        for pattern in include_patterns {
            self.include_regexes.push(Regex::new(pattern)?);
        }
        for pattern in exclude_patterns {
            self.exclude_regexes.push(Regex::new(pattern)?);
        }
        Ok(self)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// True iff the URL's host is exactly the target domain and it carries no anchor
    pub fn is_in_domain(&self, url: &str) -> bool {
        if url.contains('#') {
            return false;
        }
        match Url::parse(url) {
            Ok(parsed) => parsed.host_str() == Some(self.domain.as_str()),
            Err(_) => false,
        }
    }

    /// Determine if a discovered URL should be queued
    pub fn should_crawl(&self, url: &str) -> bool {
        if !self.is_in_domain(url) {
            return false;
        }

        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|regex| regex.is_match(url)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|regex| regex.is_match(url))
    }
}
