use sha2::{Digest, Sha256};
use url::Url;

/// Characters that are not allowed in file names on common filesystems
const ILLEGAL_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace filesystem-illegal characters with underscores
pub fn sanitize_filename(name: &str) -> String {
    let name: String = name
        .chars()
        .map(|c| {
            if ILLEGAL_FILENAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Limit filename length
    if name.chars().count() > 150 {
        name.chars().take(150).collect()
    } else {
        name
    }
}

/// Derive the local cache filename for a PDF URL.
///
/// Uses the last path segment when there is one, otherwise a name derived
/// from a hash of the full URL.
pub fn pdf_filename(url: &str) -> String {
    let basename = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_default();
    let basename = urlencoding::decode(&basename)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| basename.clone());

    if basename.is_empty() {
        let digest = Sha256::digest(url.as_bytes());
        return format!("document_{}.pdf", &hex::encode(digest)[..16]);
    }

    let name = sanitize_filename(&basename);
    if name.to_lowercase().ends_with(".pdf") {
        name
    } else {
        format!("{name}.pdf")
    }
}

/// Title-case a file stem: `annual_report-2023` becomes `Annual Report 2023`
pub fn title_from_filename(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
