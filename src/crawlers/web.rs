use crate::config::HarvestConfig;
use crate::crawlers::documents::DocumentSource;
use crate::crawlers::frontier::{CrawlReport, CrawlState, TargetOutcome};
use crate::crawlers::renderer::Renderer;
use crate::error::{HarvestError, RenderError};
use crate::filter::{UrlFilter, UrlKind, classify, normalize_url};
use crate::parsers::{html, text};
use crate::results::{PageRecord, SourceType};
use url::Url;

/// Runs a breadth-first crawl from `config.start_url`.
///
/// Targets are processed one at a time. Per-target failures are logged and
/// the crawl moves on. Only a browser session that cannot be started before
/// the first page renders aborts the run; once a page has rendered, a lost
/// session costs the current target and the records gathered so far are kept.
/// The renderer is closed before returning, whatever the outcome.
pub async fn crawl<R, D>(
    config: &HarvestConfig,
    filter: &UrlFilter,
    renderer: &mut R,
    documents: &mut D,
) -> Result<CrawlReport, HarvestError>
where
    R: Renderer,
    D: DocumentSource,
{
    ::log::info!(
        "Starting crawl at {} (max pages: {}, max depth: {})",
        config.start_url,
        config.max_pages,
        config.max_depth
    );

    let mut state = CrawlState::seeded(&config.start_url);
    let result = process_frontier(config, filter, renderer, documents, &mut state).await;
    renderer.close().await;
    result?;

    let report = state.into_report();
    ::log::info!(
        "Crawl finished: {} recorded, {} skipped, {} failed, {} URLs visited, {} PDF links seen",
        report.recorded,
        report.skipped,
        report.failed,
        report.visited,
        report.pdf_links.len()
    );
    Ok(report)
}

/// Main loop: pop targets until the frontier is empty or the page budget is spent
async fn process_frontier<R, D>(
    config: &HarvestConfig,
    filter: &UrlFilter,
    renderer: &mut R,
    documents: &mut D,
    state: &mut CrawlState,
) -> Result<(), HarvestError>
where
    R: Renderer,
    D: DocumentSource,
{
    let mut session_established = false;

    while state.html_recorded() < config.max_pages {
        let Some(target) = state.pop() else {
            ::log::info!("Frontier exhausted");
            break;
        };

        let kind = classify(&target.url);
        let url = normalize_url(&target.url, kind);

        if state.is_visited(&url) {
            ::log::trace!("Skipping already visited: {}", url);
            continue;
        }
        if target.depth > config.max_depth {
            ::log::debug!("Skipping {} at depth {}", url, target.depth);
            continue;
        }
        state.mark_visited(&url);

        let outcome = match kind {
            UrlKind::Asset => {
                ::log::debug!("Ignoring asset: {}", url);
                continue;
            }
            UrlKind::Pdf => process_pdf(config, documents, state, &url).await,
            UrlKind::Html => {
                match process_html(config, filter, renderer, state, &url, target.depth).await {
                    Ok(outcome) => {
                        session_established = true;
                        outcome
                    }
                    Err(RenderError::Session(message)) if !session_established => {
                        return Err(HarvestError::Session(message));
                    }
                    Err(e) => {
                        ::log::error!("Failed to scrape {}: {}", url, e);
                        TargetOutcome::Failed
                    }
                }
            }
        };
        state.count(outcome);
    }

    if state.html_recorded() >= config.max_pages {
        ::log::info!(
            "Page budget of {} reached with {} targets still queued",
            config.max_pages,
            state.pending()
        );
    }
    Ok(())
}

/// PDFs are leaves: fetched and recorded, never searched for links
async fn process_pdf<D: DocumentSource>(
    config: &HarvestConfig,
    documents: &mut D,
    state: &mut CrawlState,
    url: &str,
) -> TargetOutcome {
    if !config.process_pdfs {
        ::log::debug!("PDF processing disabled, skipping {}", url);
        return TargetOutcome::Skipped;
    }

    ::log::info!("Processing PDF: {}", url);
    let pdf = match documents.fetch(url).await {
        Ok(pdf) => pdf,
        Err(e) => {
            ::log::warn!("Failed to process PDF {}: {}", url, e);
            return TargetOutcome::Failed;
        }
    };

    if text::char_len(&pdf.content) > config.min_content_chars {
        ::log::info!("Recorded PDF {} ({} chars)", url, text::char_len(&pdf.content));
        state.record(PageRecord::new(
            url.to_string(),
            pdf.title,
            pdf.content,
            SourceType::Pdf,
        ));
        TargetOutcome::Recorded
    } else {
        ::log::warn!("Skipping PDF {}: insufficient content", url);
        TargetOutcome::Skipped
    }
}

async fn process_html<R: Renderer>(
    config: &HarvestConfig,
    filter: &UrlFilter,
    renderer: &mut R,
    state: &mut CrawlState,
    url: &str,
    depth: usize,
) -> Result<TargetOutcome, RenderError> {
    ::log::info!("Scraping: {} (depth: {})", url, depth);
    let source = renderer.render(url).await?;
    let page = html::parse(&source);

    let outcome = if text::char_len(&page.content) > config.min_content_chars {
        state.record(PageRecord::new(
            url.to_string(),
            page.title_or(url),
            page.content.clone(),
            SourceType::Html,
        ));
        TargetOutcome::Recorded
    } else {
        ::log::warn!("Skipping {}: insufficient content found", url);
        TargetOutcome::Skipped
    };

    if depth < config.max_depth {
        let queued = queue_links(filter, state, url, &page.links, depth + 1);
        ::log::info!("Found {} new links on {}", queued, url);
    }

    Ok(outcome)
}

/// Resolve hrefs against the page URL and queue the in-domain ones not seen before
fn queue_links(
    filter: &UrlFilter,
    state: &mut CrawlState,
    page_url: &str,
    links: &[String],
    depth: usize,
) -> usize {
    let Ok(base) = Url::parse(page_url) else {
        ::log::warn!("Cannot resolve links against {}", page_url);
        return 0;
    };

    let mut queued = 0;
    for link in links {
        let Ok(resolved) = base.join(link) else {
            ::log::debug!("Unresolvable link {} on {}", link, page_url);
            continue;
        };
        let kind = classify(resolved.as_str());
        let normalized = normalize_url(resolved.as_str(), kind);

        if !filter.should_crawl(&normalized) {
            ::log::trace!("URL filter rejected: {}", normalized);
            continue;
        }
        if kind == UrlKind::Pdf {
            state.note_pdf_link(&normalized);
        }
        if state.enqueue(&normalized, depth) {
            ::log::debug!("Queuing link for crawling: {}", normalized);
            queued += 1;
        }
    }
    queued
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawlers::testing::{FakeDocuments, FakeRenderer, long_text, page};

    fn config(max_pages: usize, max_depth: usize) -> HarvestConfig {
        let mut config = HarvestConfig::new("https://nortal.com");
        config.max_pages = max_pages;
        config.max_depth = max_depth;
        config
    }

    fn filter() -> UrlFilter {
        UrlFilter::new("nortal.com")
    }

    fn urls(report: &CrawlReport) -> Vec<&str> {
        report.records.iter().map(|r| r.url.as_str()).collect()
    }

    #[tokio::test]
    async fn test_end_to_end_with_pdf_and_external_link() {
        let mut renderer = FakeRenderer::new()
            .with_page(
                "https://nortal.com",
                &page(
                    "Home",
                    &long_text("home"),
                    &["/report.pdf", "https://other.com/x", "/about/"],
                ),
            )
            .with_page(
                "https://nortal.com/about",
                &page("About", &long_text("about"), &["/", "/careers"]),
            );
        let mut documents =
            FakeDocuments::new().with_pdf("https://nortal.com/report.pdf", "Report", &long_text("pdf"));

        let report = crawl(&config(2, 1), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert_eq!(
            urls(&report),
            vec![
                "https://nortal.com",
                "https://nortal.com/report.pdf",
                "https://nortal.com/about"
            ]
        );
        let html = report
            .records
            .iter()
            .filter(|r| r.source_type == SourceType::Html)
            .count();
        assert_eq!(html, 2);
        assert_eq!(report.records[1].source_type, SourceType::Pdf);
        assert_eq!(report.records[1].title, "Report");
        assert_eq!(report.records[0].title, "Home");
        assert_eq!(report.pdf_links, vec!["https://nortal.com/report.pdf"]);

        assert_eq!(renderer.rendered, vec!["https://nortal.com", "https://nortal.com/about"]);
        assert!(!renderer.rendered.iter().any(|u| u.contains("other.com")));
        assert_eq!(documents.fetched, vec!["https://nortal.com/report.pdf"]);
        assert_eq!(renderer.closed, 1);
    }

    #[tokio::test]
    async fn test_page_budget_is_respected() {
        let mut renderer = FakeRenderer::new()
            .with_page("https://nortal.com", &page("Home", &long_text("home"), &["/a", "/b", "/c"]))
            .with_page("https://nortal.com/a", &page("A", &long_text("a"), &[]))
            .with_page("https://nortal.com/b", &page("B", &long_text("b"), &[]))
            .with_page("https://nortal.com/c", &page("C", &long_text("c"), &[]));
        let mut documents = FakeDocuments::new();

        let report = crawl(&config(2, 2), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert_eq!(urls(&report), vec!["https://nortal.com", "https://nortal.com/a"]);
        assert_eq!(renderer.rendered.len(), 2);
    }

    #[tokio::test]
    async fn test_depth_limit() {
        let mut renderer = FakeRenderer::new()
            .with_page("https://nortal.com", &page("Home", &long_text("home"), &["/one"]))
            .with_page("https://nortal.com/one", &page("One", &long_text("one"), &["/two"]))
            .with_page("https://nortal.com/two", &page("Two", &long_text("two"), &[]));
        let mut documents = FakeDocuments::new();

        let report = crawl(&config(10, 1), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert_eq!(urls(&report), vec!["https://nortal.com", "https://nortal.com/one"]);
        assert!(!renderer.rendered.contains(&"https://nortal.com/two".to_string()));

        let mut renderer = FakeRenderer::new()
            .with_page("https://nortal.com", &page("Home", &long_text("home"), &["/one"]));
        let report = crawl(&config(10, 0), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();
        assert_eq!(urls(&report), vec!["https://nortal.com"]);
        assert_eq!(renderer.rendered, vec!["https://nortal.com"]);
    }

    #[tokio::test]
    async fn test_each_url_processed_once() {
        let mut renderer = FakeRenderer::new()
            .with_page(
                "https://nortal.com",
                &page("Home", &long_text("home"), &["/a", "/b", "/shared/", "/shared"]),
            )
            .with_page("https://nortal.com/a", &page("A", &long_text("a"), &["/shared", "/"]))
            .with_page("https://nortal.com/b", &page("B", &long_text("b"), &["/shared/"]))
            .with_page("https://nortal.com/shared", &page("S", &long_text("s"), &["/a"]));
        let mut documents = FakeDocuments::new();

        let report = crawl(&config(10, 3), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert_eq!(report.records.len(), 4);
        let mut rendered = renderer.rendered.clone();
        rendered.sort();
        rendered.dedup();
        assert_eq!(rendered.len(), renderer.rendered.len());
    }

    #[tokio::test]
    async fn test_minimum_content_gate() {
        let mut renderer = FakeRenderer::new()
            .with_page("https://nortal.com", &page("Home", &long_text("home"), &["/short", "/long"]))
            .with_page("https://nortal.com/short", &page("Short", &"x".repeat(99), &[]))
            .with_page("https://nortal.com/long", &page("Long", &"y".repeat(101), &[]));
        let mut documents = FakeDocuments::new();

        let report = crawl(&config(10, 1), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert_eq!(urls(&report), vec!["https://nortal.com", "https://nortal.com/long"]);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.visited, 3);
    }

    #[tokio::test]
    async fn test_render_failure_is_not_fatal() {
        let mut renderer = FakeRenderer::new()
            .with_page("https://nortal.com", &page("Home", &long_text("home"), &["/broken", "/ok"]))
            .with_page("https://nortal.com/ok", &page("Ok", &long_text("ok"), &[]));
        let mut documents = FakeDocuments::new();

        let report = crawl(&config(10, 1), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert_eq!(urls(&report), vec!["https://nortal.com", "https://nortal.com/ok"]);
        assert_eq!(report.failed, 1);
        assert_eq!(renderer.closed, 1);
    }

    #[tokio::test]
    async fn test_session_failure_aborts_and_closes() {
        let mut renderer = FakeRenderer::unavailable();
        let mut documents = FakeDocuments::new();

        let result = crawl(&config(10, 1), &filter(), &mut renderer, &mut documents).await;

        assert!(matches!(result, Err(HarvestError::Session(_))));
        assert_eq!(renderer.closed, 1);
    }

    #[tokio::test]
    async fn test_session_lost_mid_crawl_keeps_records() {
        let mut renderer = FakeRenderer::new()
            .with_page(
                "https://nortal.com",
                &page("Home", &long_text("home"), &["/about", "/report.pdf", "/careers"]),
            )
            .with_page("https://nortal.com/about", &page("About", &long_text("about"), &[]))
            .with_page("https://nortal.com/careers", &page("Careers", &long_text("careers"), &[]))
            .losing_session_after(1);
        let mut documents =
            FakeDocuments::new().with_pdf("https://nortal.com/report.pdf", "Report", &long_text("pdf"));

        let report = crawl(&config(10, 1), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert_eq!(
            urls(&report),
            vec!["https://nortal.com", "https://nortal.com/report.pdf"]
        );
        assert_eq!(report.failed, 2);
        assert_eq!(renderer.closed, 1);
    }

    #[tokio::test]
    async fn test_pdf_failures_and_disabled_processing() {
        let home = page(
            "Home",
            &long_text("home"),
            &["/missing.pdf", "/thin.pdf", "/style.css", "/logo.png"],
        );
        let mut renderer = FakeRenderer::new().with_page("https://nortal.com", &home);
        let mut documents = FakeDocuments::new().with_pdf("https://nortal.com/thin.pdf", "Thin", "tiny");

        let report = crawl(&config(10, 1), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert_eq!(urls(&report), vec!["https://nortal.com"]);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(renderer.rendered, vec!["https://nortal.com"]);

        let mut renderer = FakeRenderer::new().with_page("https://nortal.com", &home);
        let mut documents = FakeDocuments::new();
        let mut disabled = config(10, 1);
        disabled.process_pdfs = false;
        let report = crawl(&disabled, &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert!(documents.fetched.is_empty());
        assert_eq!(report.pdf_links.len(), 2);
        assert_eq!(report.records.len(), 1);
    }

    #[tokio::test]
    async fn test_anchor_links_are_ignored() {
        let mut renderer = FakeRenderer::new().with_page(
            "https://nortal.com",
            &page("Home", &long_text("home"), &["#top", "/about#team"]),
        );
        let mut documents = FakeDocuments::new();

        crawl(&config(10, 1), &filter(), &mut renderer, &mut documents)
            .await
            .unwrap();

        assert_eq!(renderer.rendered, vec!["https://nortal.com"]);
    }
}
