use crate::filter::{classify, normalize_url};
use crate::results::{PageRecord, SourceType};
use std::collections::{HashSet, VecDeque};

/// A URL waiting to be processed, with its distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    pub depth: usize,
}

/// How processing a target ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    Recorded,
    Skipped,
    Failed,
}

/// Summary of a finished crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Records in discovery order
    pub records: Vec<PageRecord>,
    /// Number of distinct URLs processed
    pub visited: usize,
    /// PDF links found on pages, in discovery order
    pub pdf_links: Vec<String>,
    pub recorded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// All mutable state of one crawl run
#[derive(Debug, Default)]
pub struct CrawlState {
    frontier: VecDeque<CrawlTarget>,
    // Everything ever queued, so a URL enters the frontier at most once
    seen: HashSet<String>,
    visited: HashSet<String>,
    records: Vec<PageRecord>,
    html_recorded: usize,
    pdf_links: Vec<String>,
    recorded: usize,
    skipped: usize,
    failed: usize,
}

impl CrawlState {
    /// State with only the seed queued at depth 0
    pub fn seeded(start_url: &str) -> Self {
        let mut state = Self::default();
        state.enqueue(start_url, 0);
        state
    }

    /// Queue a URL unless it has been queued before. Returns whether it was added.
    pub fn enqueue(&mut self, url: &str, depth: usize) -> bool {
        let url = normalize_url(url, classify(url));
        if !self.seen.insert(url.clone()) {
            return false;
        }
        self.frontier.push_back(CrawlTarget { url, depth });
        true
    }

    pub fn pop(&mut self) -> Option<CrawlTarget> {
        self.frontier.pop_front()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns false if the URL was already visited
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub fn record(&mut self, record: PageRecord) {
        if record.source_type == SourceType::Html {
            self.html_recorded += 1;
        }
        self.records.push(record);
    }

    /// HTML records so far; PDFs do not count against the page budget
    pub fn html_recorded(&self) -> usize {
        self.html_recorded
    }

    pub fn note_pdf_link(&mut self, url: &str) {
        if !self.pdf_links.iter().any(|known| known == url) {
            self.pdf_links.push(url.to_string());
        }
    }

    pub fn count(&mut self, outcome: TargetOutcome) {
        match outcome {
            TargetOutcome::Recorded => self.recorded += 1,
            TargetOutcome::Skipped => self.skipped += 1,
            TargetOutcome::Failed => self.failed += 1,
        }
    }

    pub fn pending(&self) -> usize {
        self.frontier.len()
    }

    pub fn into_report(self) -> CrawlReport {
        CrawlReport {
            records: self.records,
            visited: self.visited.len(),
            pdf_links: self.pdf_links,
            recorded: self.recorded,
            skipped: self.skipped,
            failed: self.failed,
        }
    }
}
