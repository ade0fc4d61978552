//! Reading and writing the harvested corpus file.
//!
//! The corpus is a pretty-printed JSON array of [`PageRecord`]s in discovery
//! order. Non-ASCII text is written as-is, not escaped.

use crate::error::HarvestError;
use crate::results::{PageRecord, SourceType};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Record counts by source type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub total: usize,
    pub html: usize,
    pub pdf: usize,
}

impl CorpusSummary {
    pub fn from_records(records: &[PageRecord]) -> Self {
        let html = records
            .iter()
            .filter(|r| r.source_type == SourceType::Html)
            .count();
        Self {
            total: records.len(),
            html,
            pdf: records.len() - html,
        }
    }
}

/// Write `records` to `path`, replacing any existing file
pub fn write_corpus(path: &Path, records: &[PageRecord]) -> Result<CorpusSummary, HarvestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;

    let summary = CorpusSummary::from_records(records);
    ::log::info!(
        "Saved {} records to {} ({} html, {} pdf)",
        summary.total,
        path.display(),
        summary.html,
        summary.pdf
    );
    Ok(summary)
}

/// Read a corpus file back
pub fn load_corpus(path: &Path) -> Result<Vec<PageRecord>, HarvestError> {
    let reader = BufReader::new(File::open(path)?);
    let records = serde_json::from_reader(reader)?;
    Ok(records)
}

/// Which records a sample kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleInfo {
    pub total_html: usize,
    pub total_pdf: usize,
    pub sampled_html: usize,
    pub sampled_pdf: usize,
    pub html_urls: Vec<String>,
    pub pdf_urls: Vec<String>,
}

/// Keep the first `html_count` HTML records and the first `pdf_count` PDF
/// records; HTML records come first in the result.
pub fn sample(records: &[PageRecord], html_count: usize, pdf_count: usize) -> (Vec<PageRecord>, SampleInfo) {
    let (html, pdf): (Vec<&PageRecord>, Vec<&PageRecord>) = records
        .iter()
        .partition(|r| r.source_type == SourceType::Html);

    let sampled_html: Vec<PageRecord> = html.iter().take(html_count).map(|r| (*r).clone()).collect();
    let sampled_pdf: Vec<PageRecord> = pdf.iter().take(pdf_count).map(|r| (*r).clone()).collect();

    let info = SampleInfo {
        total_html: html.len(),
        total_pdf: pdf.len(),
        sampled_html: sampled_html.len(),
        sampled_pdf: sampled_pdf.len(),
        html_urls: sampled_html.iter().map(|r| r.url.clone()).collect(),
        pdf_urls: sampled_pdf.iter().map(|r| r.url.clone()).collect(),
    };

    let mut sampled = sampled_html;
    sampled.extend(sampled_pdf);
    (sampled, info)
}

/// Write a sampled corpus to `output` and its `sample_info.json` next to it
pub fn write_sample(
    input: &Path,
    output: &Path,
    html_count: usize,
    pdf_count: usize,
) -> Result<SampleInfo, HarvestError> {
    let records = load_corpus(input)?;
    let (sampled, info) = sample(&records, html_count, pdf_count);
    write_corpus(output, &sampled)?;

    let info_path = output
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join("sample_info.json");
    let mut writer = BufWriter::new(File::create(&info_path)?);
    serde_json::to_writer_pretty(&mut writer, &info)?;
    writer.flush()?;
    ::log::info!(
        "Sampled {} html + {} pdf records, info saved to {}",
        info.sampled_html,
        info.sampled_pdf,
        info_path.display()
    );

    Ok(info)
}
