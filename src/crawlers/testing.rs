//! In-memory stand-ins for the browser and the PDF pipeline.

use crate::crawlers::documents::DocumentSource;
use crate::crawlers::renderer::Renderer;
use crate::error::{DocumentError, PdfError, RenderError};
use crate::parsers::pdf::PdfContent;
use std::collections::HashMap;

/// Serves canned HTML and remembers what was requested
#[derive(Debug, Default)]
pub struct FakeRenderer {
    pages: HashMap<String, String>,
    unavailable: bool,
    lost_after: Option<usize>,
    pub rendered: Vec<String>,
    pub closed: usize,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer whose browser never starts
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Render `count` pages, then behave as if the browser went away for good
    pub fn losing_session_after(mut self, count: usize) -> Self {
        self.lost_after = Some(count);
        self
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

impl Renderer for FakeRenderer {
    async fn render(&mut self, url: &str) -> Result<String, RenderError> {
        if self.unavailable {
            return Err(RenderError::Session("no browser".to_string()));
        }
        if self.lost_after.is_some_and(|count| self.rendered.len() >= count) {
            return Err(RenderError::Session("browser went away".to_string()));
        }
        self.rendered.push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| RenderError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            })
    }

    async fn close(&mut self) {
        self.closed += 1;
    }
}

/// Serves canned PDF text by URL
#[derive(Debug, Default)]
pub struct FakeDocuments {
    documents: HashMap<String, PdfContent>,
    pub fetched: Vec<String>,
}

impl FakeDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pdf(mut self, url: &str, title: &str, content: &str) -> Self {
        self.documents.insert(
            url.to_string(),
            PdfContent {
                title: title.to_string(),
                content: content.to_string(),
            },
        );
        self
    }
}

impl DocumentSource for FakeDocuments {
    async fn fetch(&mut self, url: &str) -> Result<PdfContent, DocumentError> {
        self.fetched.push(url.to_string());
        self.documents
            .get(url)
            .cloned()
            .ok_or(DocumentError::Extract(PdfError::Empty))
    }
}

/// A page whose main content is exactly `content`, with links in an aside
pub fn page(title: &str, content: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{href}">link</a>"#))
        .collect();
    format!(
        "<html><head><title>{title}</title></head><body><main>{content}</main><aside>{anchors}</aside></body></html>"
    )
}

/// Comfortably more than the minimum content length
pub fn long_text(label: &str) -> String {
    format!("{label} is part of the harvested corpus. ")
        .repeat(5)
        .trim()
        .to_string()
}
