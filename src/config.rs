use crate::error::HarvestError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variables that point the renderer at a remote WebDriver endpoint
pub const REMOTE_ENDPOINT_VARS: [&str; 2] = ["SELENIUM_URL", "WEBDRIVER_URL"];

/// Configuration for a harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// URL to start crawling from
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// Host that discovered links must match (defaults to the start URL's host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_domain: Option<String>,

    /// Maximum number of HTML pages recorded per run
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum number of link hops from the start URL
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Directory the corpus file is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Name of the corpus file inside `output_dir`
    #[serde(default = "default_corpus_file")]
    pub corpus_file: String,

    /// Directory downloaded PDFs are cached in
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: PathBuf,

    /// Whether discovered PDFs are downloaded and extracted
    #[serde(default = "default_process_pdfs")]
    pub process_pdfs: bool,

    /// Records with this many characters or fewer are dropped
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,

    /// Wait after navigation so client-side rendering can finish
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,

    /// Remote WebDriver endpoint; when unset a local chromedriver is spawned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webdriver_url: Option<String>,

    /// chromedriver binary used for the local backend
    #[serde(default = "default_chromedriver_path")]
    pub chromedriver_path: String,

    #[serde(default = "default_chromedriver_port")]
    pub chromedriver_port: u16,

    /// Regex patterns for URLs to include
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

fn default_start_url() -> String {
    "https://nortal.com/".to_string()
}

fn default_max_pages() -> usize {
    10
}

fn default_max_depth() -> usize {
    2
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_corpus_file() -> String {
    "scraped_data.json".to_string()
}

fn default_pdf_dir() -> PathBuf {
    PathBuf::from("data/pdfs")
}

fn default_process_pdfs() -> bool {
    true
}

fn default_min_content_chars() -> usize {
    100
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_navigation_timeout_secs() -> u64 {
    45
}

fn default_download_timeout_secs() -> u64 {
    30
}

fn default_chromedriver_path() -> String {
    "chromedriver".to_string()
}

fn default_chromedriver_port() -> u16 {
    9515
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self::new(&default_start_url())
    }
}

impl HarvestConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            target_domain: None,
            max_pages: default_max_pages(),
            max_depth: default_max_depth(),
            output_dir: default_output_dir(),
            corpus_file: default_corpus_file(),
            pdf_dir: default_pdf_dir(),
            process_pdfs: default_process_pdfs(),
            min_content_chars: default_min_content_chars(),
            settle_delay_ms: default_settle_delay_ms(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            download_timeout_secs: default_download_timeout_secs(),
            webdriver_url: None,
            chromedriver_path: default_chromedriver_path(),
            chromedriver_port: default_chromedriver_port(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HarvestError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, HarvestError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the WebDriver endpoint from the environment, if one is set
    pub fn apply_env(&mut self) {
        let from_env = REMOTE_ENDPOINT_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty());
        if let Some(endpoint) = from_env {
            self.webdriver_url = Some(endpoint);
        }
    }

    /// Check the configuration and resolve the domain links must stay on
    pub fn validate(&self) -> Result<String, HarvestError> {
        let start = Url::parse(&self.start_url).map_err(|source| HarvestError::InvalidStartUrl {
            url: self.start_url.clone(),
            source,
        })?;
        if self.corpus_file.is_empty() {
            return Err(HarvestError::Config("corpus_file must not be empty".to_string()));
        }

        match &self.target_domain {
            Some(domain) if !domain.is_empty() => Ok(domain.clone()),
            _ => start.host_str().map(str::to_string).ok_or_else(|| {
                HarvestError::Config(format!("start URL {} has no host", self.start_url))
            }),
        }
    }

    /// Full path of the corpus file
    pub fn corpus_path(&self) -> PathBuf {
        self.output_dir.join(&self.corpus_file)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}
