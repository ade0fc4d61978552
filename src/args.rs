use clap::{Parser, Subcommand, ValueEnum};
use corpus_harvest::HarvestConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "corpus-harvest")]
#[command(about = "Crawls a site with headless Chrome and writes a JSON corpus of pages and PDFs")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl a site and write the corpus
    Crawl(CrawlArgs),

    /// Keep the first N html and M pdf records of an existing corpus
    Sample(SampleArgs),
}

#[derive(clap::Args, Debug)]
pub struct CrawlArgs {
    /// URL to start from (defaults to the configured start URL)
    pub start_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preset page budget and depth [default without a config file: standard]
    #[arg(short, long, value_enum)]
    pub mode: Option<RunMode>,

    /// Maximum number of HTML pages to record (overrides the mode)
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Maximum link depth (overrides the mode)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Directory to write the corpus to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Directory to cache downloaded PDFs in
    #[arg(long)]
    pub pdf_dir: Option<PathBuf>,

    /// Do not download or extract PDFs
    #[arg(long)]
    pub no_pdf: bool,
}

#[derive(clap::Args, Debug)]
pub struct SampleArgs {
    /// Corpus file to sample from
    #[arg(long, default_value = "data/scraped_data.json")]
    pub input: PathBuf,

    /// Where to write the sampled corpus
    #[arg(long, default_value = "data/sampled_data.json")]
    pub output: PathBuf,

    /// Number of HTML records to keep
    #[arg(long, default_value_t = 20)]
    pub html: usize,

    /// Number of PDF records to keep
    #[arg(long, default_value_t = 5)]
    pub pdf: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// 3 pages, depth 1
    Quick,
    /// 10 pages, depth 2
    Standard,
    /// 50 pages, depth 2
    Full,
}

impl RunMode {
    /// (max_pages, max_depth) for this mode
    pub fn budget(self) -> (usize, usize) {
        match self {
            RunMode::Quick => (3, 1),
            RunMode::Standard => (10, 2),
            RunMode::Full => (50, 2),
        }
    }
}

impl CrawlArgs {
    /// Layer the command line over the file configuration and environment
    pub fn into_config(self) -> Result<HarvestConfig, corpus_harvest::HarvestError> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::from_file(path)?,
            None => HarvestConfig::default(),
        };

        let mode = match (self.mode, &self.config) {
            (Some(mode), _) => Some(mode),
            (None, None) => Some(RunMode::Standard),
            (None, Some(_)) => None,
        };
        if let Some(mode) = mode {
            let (max_pages, max_depth) = mode.budget();
            config.max_pages = max_pages;
            config.max_depth = max_depth;
        }
        if let Some(start_url) = self.start_url {
            config.start_url = start_url;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(pdf_dir) = self.pdf_dir {
            config.pdf_dir = pdf_dir;
        }
        if self.no_pdf {
            config.process_pdfs = false;
        }

        config.apply_env();
        Ok(config)
    }
}
