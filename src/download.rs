use crate::error::DownloadError;
use crate::utils::pdf_filename;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::path::PathBuf;
use std::time::Duration;

/// Browser-like user agent; some sites refuse document downloads to bots
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// First bytes of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF";

/// Downloads PDFs into a directory that doubles as a cache keyed by file name
#[derive(Debug, Clone)]
pub struct PdfDownloader {
    client: Client,
    dir: PathBuf,
}

impl PdfDownloader {
    /// Create a downloader storing files under `dir`
    pub fn new(dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            dir: dir.into(),
        })
    }

    /// Local path a URL is cached at
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(pdf_filename(url))
    }

    /// Fetch `url` into the cache and return the local path.
    ///
    /// An existing file at the target path is returned without any network I/O.
    pub async fn download(&self, url: &str) -> Result<PathBuf, DownloadError> {
        let path = self.path_for(url);
        if path.exists() {
            ::log::debug!("PDF cache hit for {}: {}", url, path.display());
            return Ok(path);
        }

        ::log::info!("Downloading PDF: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();
        let bytes = response.bytes().await?;

        if !is_pdf(&content_type, &bytes) {
            return Err(DownloadError::NotPdf { content_type });
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, &bytes).await?;
        ::log::debug!("Saved {} bytes to {}", bytes.len(), path.display());

        Ok(path)
    }
}

/// A response is accepted as PDF by its content type or its magic bytes
fn is_pdf(content_type: &str, bytes: &[u8]) -> bool {
    content_type.contains("pdf") || bytes.starts_with(PDF_MAGIC)
}
