pub mod documents;
pub mod frontier;
pub mod renderer;
pub mod web;

#[cfg(test)]
pub(crate) mod testing;

pub use documents::{DocumentSource, PdfExtractor};
pub use frontier::{CrawlReport, CrawlState, CrawlTarget, TargetOutcome};
pub use renderer::{Backend, Renderer, WebDriverRenderer};
