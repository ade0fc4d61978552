use thiserror::Error;

/// Errors that end a harvest run
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid start URL '{url}': {source}")]
    InvalidStartUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// No browser backend could be started
    #[error("browser session unavailable: {0}")]
    Session(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failure to render a single page
#[derive(Debug, Error)]
pub enum RenderError {
    /// The browser session could not be acquired at all
    #[error("could not start browser session: {0}")]
    Session(String),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("timed out rendering {url}")]
    Timeout { url: String },
}

impl RenderError {
    /// Only session acquisition failures abort a run
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::Session(_))
    }
}

/// Failure to fetch a PDF into the local cache
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("response is not a PDF (content-type: {content_type})")]
    NotPdf { content_type: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure to read text out of a local PDF
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("could not parse PDF: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("PDF has no pages")]
    Empty,
}

/// Failure to turn a PDF URL into text
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("extraction failed: {0}")]
    Extract(#[from] PdfError),
}
