use crate::download::PdfDownloader;
use crate::error::DocumentError;
use crate::parsers::pdf::{self, PdfContent};

/// Something that can turn a PDF URL into title and text
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    async fn fetch(&mut self, url: &str) -> Result<PdfContent, DocumentError>;
}

/// Downloads PDFs into the local cache and extracts their text
pub struct PdfExtractor {
    downloader: PdfDownloader,
}

impl PdfExtractor {
    pub fn new(downloader: PdfDownloader) -> Self {
        Self { downloader }
    }
}

impl DocumentSource for PdfExtractor {
    async fn fetch(&mut self, url: &str) -> Result<PdfContent, DocumentError> {
        let path = self.downloader.download(url).await?;
        let extracted = pdf::extract(&path)?;
        ::log::debug!(
            "Extracted {} characters from {}",
            extracted.content.chars().count(),
            path.display()
        );
        Ok(extracted)
    }
}
