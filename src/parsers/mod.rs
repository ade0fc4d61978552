pub mod html;
pub mod pdf;
pub mod text;

#[cfg(test)]
mod tests;

/// Result of parsing a rendered HTML page
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Document title, if present and non-empty
    pub title: Option<String>,
    /// Cleaned text of the primary content container
    pub content: String,
    /// Hrefs of the anchors left after boilerplate removal (unresolved)
    pub links: Vec<String>,
}

impl ParseResult {
    /// Title to record for the page, falling back to its URL
    pub fn title_or(&self, url: &str) -> String {
        self.title.clone().unwrap_or_else(|| url.to_string())
    }
}
