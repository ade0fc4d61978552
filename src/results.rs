use serde::{Deserialize, Serialize};

/// Where a record's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Html,
    Pdf,
}

/// One harvested page or document, as written to the corpus file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL of the page (trailing slash stripped for HTML, untouched for PDF)
    pub url: String,

    /// Document title, or the URL when the page has none
    pub title: String,

    /// Cleaned text content
    pub content: String,

    pub source_type: SourceType,
}

impl PageRecord {
    /// Create a new record
    pub fn new(url: String, title: String, content: String, source_type: SourceType) -> Self {
        Self {
            url,
            title,
            content,
            source_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let record = PageRecord::new(
            "https://nortal.com/about".to_string(),
            "About".to_string(),
            "Tallinn – Ülemiste".to_string(),
            SourceType::Html,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["url"], "https://nortal.com/about");
        assert_eq!(json["title"], "About");
        assert_eq!(json["content"], "Tallinn – Ülemiste");
        assert_eq!(json["source_type"], "html");

        let pdf = serde_json::to_string(&SourceType::Pdf).unwrap();
        assert_eq!(pdf, "\"pdf\"");
    }
}
