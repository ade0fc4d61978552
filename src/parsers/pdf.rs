use crate::error::PdfError;
use crate::parsers::text;
use crate::utils::title_from_filename;
use lopdf::{Document, Object};
use std::path::Path;

/// Title and cleaned text of a local PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfContent {
    pub title: String,
    pub content: String,
}

/// Reads title and text out of a PDF on disk.
///
/// The title comes from the document's metadata, falling back to a
/// title-cased form of the file name. Pages whose text cannot be decoded are
/// skipped; a file that cannot be parsed at all is an error.
pub fn extract(path: &Path) -> Result<PdfContent, PdfError> {
    let doc = Document::load(path)?;

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Err(PdfError::Empty);
    }

    let mut page_texts = Vec::with_capacity(pages.len());
    for page in &pages {
        match doc.extract_text(&[*page]) {
            Ok(page_text) => page_texts.push(page_text),
            Err(e) => ::log::debug!("No text on page {} of {}: {}", page, path.display(), e),
        }
    }
    let content = text::join_fragments(page_texts.iter().map(String::as_str));

    let title = metadata_title(&doc).unwrap_or_else(|| fallback_title(path));

    Ok(PdfContent { title, content })
}

/// The `/Title` entry of the document information dictionary
pub fn metadata_title(doc: &Document) -> Option<String> {
    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        direct => direct,
    };
    let raw = info.as_dict().ok()?.get(b"Title").ok()?.as_str().ok()?;
    let title = decode_pdf_string(raw).trim().to_string();
    (!title.is_empty()).then_some(title)
}

/// Decode a PDF text string: UTF-16BE when it carries a byte order mark,
/// otherwise treated as single-byte Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn fallback_title(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    title_from_filename(&stem)
}
