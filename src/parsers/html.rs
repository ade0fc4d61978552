use crate::parsers::ParseResult;
use crate::parsers::text;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Elements that never hold page content
static NON_CONTENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "script, style, nav, footer, header, noscript, iframe, form, button, input, select, textarea",
    )
    .expect("non-content selector is valid")
});

static WITH_CLASS_OR_ID: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[class], [id]").expect("attribute selector is valid"));

/// Class/id fragments that mark cookie banners, popups and similar furniture
static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)cookie|banner|popup|modal|newsletter|subscribe|login|signup")
        .expect("boilerplate pattern is valid")
});

static CONTENT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"content|main|post").expect("content pattern is valid"));

static MAIN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("main").expect("valid"));
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").expect("valid"));
static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div[class]").expect("valid"));
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").expect("valid"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("valid"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("valid"));

/// Parses rendered HTML into title, cleaned main content and outbound links.
///
/// Links are read after boilerplate removal, so navigation, header and
/// footer links are not followed.
pub fn parse(html: &str) -> ParseResult {
    let mut doc = Html::parse_document(html);

    let title = extract_title(&doc);
    let content = extract_content(&mut doc);
    let links = extract_links(&doc);

    ::log::debug!("HTML parser found {} links", links.len());

    ParseResult {
        title,
        content,
        links,
    }
}

/// The trimmed document title, if there is a non-empty one
pub fn extract_title(doc: &Html) -> Option<String> {
    doc.root_element()
        .select(&TITLE)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Removes non-content subtrees from the document in place
pub fn strip_boilerplate(doc: &mut Html) {
    let root = doc.root_element();
    let mut doomed: Vec<_> = root.select(&NON_CONTENT).map(|el| el.id()).collect();
    doomed.extend(
        root.select(&WITH_CLASS_OR_ID)
            .filter(|el| is_boilerplate(el))
            .map(|el| el.id()),
    );

    for id in doomed {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn is_boilerplate(element: &ElementRef) -> bool {
    let value = element.value();
    value.attr("class").is_some_and(|class| BOILERPLATE.is_match(class))
        || value.attr("id").is_some_and(|id| BOILERPLATE.is_match(id))
}

/// Strips boilerplate and returns the whitespace-normalized text of the
/// primary content container: `main`, then `article`, then a `div` whose
/// class looks like content, then the whole body.
pub fn extract_content(doc: &mut Html) -> String {
    strip_boilerplate(doc);

    match primary_container(doc) {
        Some(container) => text::join_fragments(container.text()),
        None => String::new(),
    }
}

fn primary_container(doc: &Html) -> Option<ElementRef<'_>> {
    let root = doc.root_element();
    root.select(&MAIN)
        .next()
        .or_else(|| root.select(&ARTICLE).next())
        .or_else(|| {
            root.select(&DIV)
                .find(|div| div.value().classes().any(|class| CONTENT_CLASS.is_match(class)))
        })
        .or_else(|| root.select(&BODY).next())
}

/// Every `href` still present in the document, in document order
pub fn extract_links(doc: &Html) -> Vec<String> {
    doc.root_element()
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}
