/// Collapse every whitespace run to a single space and trim the ends.
///
/// Used for both HTML text and text pulled out of PDFs so the two
/// sources produce comparable content.
pub fn clean_text(text: &str) -> String {
    normalize_whitespace_in_segment(text)
}

/// Joins text fragments with single spaces, then cleans the result
pub fn join_fragments<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = fragments.into_iter().collect::<Vec<_>>().join(" ");
    clean_text(&joined)
}

/// Normalizes whitespace within a single line or paragraph
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of characters, as counted by the minimum-content gate
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
