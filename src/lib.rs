pub mod config;
pub mod corpus;
pub mod crawlers;
pub mod download;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::HarvestConfig;
pub use corpus::CorpusSummary;
pub use crawlers::CrawlReport;
pub use error::HarvestError;
pub use results::{PageRecord, SourceType};

use crawlers::{DocumentSource, PdfExtractor, Renderer, WebDriverRenderer};
use download::PdfDownloader;
use filter::UrlFilter;
use std::path::PathBuf;

/// What a finished harvest produced
#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    pub report: CrawlReport,
    pub summary: CorpusSummary,
    pub corpus_path: PathBuf,
}

/// Builder for a crawl-and-persist run
pub struct Harvest {
    config: HarvestConfig,
}

impl Harvest {
    /// Create a new Harvest with the given configuration
    pub fn new(config: HarvestConfig) -> Self {
        Self { config }
    }

    /// Set the HTML page budget
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the maximum link depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the directory the corpus is written to
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Set the directory PDFs are cached in
    pub fn with_pdf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdf_dir = dir.into();
        self
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Crawl with headless Chrome and the HTTP PDF downloader, then write the corpus
    pub async fn run(&self) -> Result<HarvestOutcome, HarvestError> {
        let mut renderer = WebDriverRenderer::from_config(&self.config);
        let downloader = PdfDownloader::new(&self.config.pdf_dir, self.config.download_timeout())
            .map_err(|e| HarvestError::Config(format!("cannot build HTTP client: {e}")))?;
        let mut documents = PdfExtractor::new(downloader);

        self.run_with(&mut renderer, &mut documents).await
    }

    /// Crawl with the given renderer and document source, then write the corpus
    pub async fn run_with<R, D>(
        &self,
        renderer: &mut R,
        documents: &mut D,
    ) -> Result<HarvestOutcome, HarvestError>
    where
        R: Renderer,
        D: DocumentSource,
    {
        let domain = self.config.validate()?;
        let filter = UrlFilter::new(domain).with_patterns(
            &self.config.include_patterns,
            &self.config.exclude_patterns,
        )?;

        std::fs::create_dir_all(&self.config.output_dir)?;
        if self.config.process_pdfs {
            std::fs::create_dir_all(&self.config.pdf_dir)?;
        }

        let report = crawlers::web::crawl(&self.config, &filter, renderer, documents).await?;

        let corpus_path = self.config.corpus_path();
        let summary = corpus::write_corpus(&corpus_path, &report.records)?;

        Ok(HarvestOutcome {
            report,
            summary,
            corpus_path,
        })
    }
}
