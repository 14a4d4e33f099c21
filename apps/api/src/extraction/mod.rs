//! File Text Extractor — best-effort plain text from uploaded documents.
//!
//! Client-declared media types are unreliable (browsers happily send
//! `application/octet-stream`), so the format is resolved by an ordered chain
//! of classifiers, first match wins:
//!
//! 1. `%PDF` signature
//! 2. declared media type
//! 3. filename extension
//! 4. `PK` (ZIP) signature → DOCX
//! 5. plain text
//!
//! Extraction itself never fails: corrupt documents come back as `""` and the
//! caller decides whether empty text is an error.

use std::path::Path;

use tracing::debug;

mod docx;
mod pdf;
mod text;

const PDF_SIGNATURE: &[u8] = b"%PDF";
const ZIP_SIGNATURE: &[u8] = b"PK";

const MEDIA_PDF: &str = "application/pdf";
const MEDIA_DOC: &str = "application/msword";
const MEDIA_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MEDIA_TEXT: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    /// Word documents, legacy `.doc` included. Only the ZIP-based layout is
    /// readable; anything else extracts to empty text.
    Docx,
    Text,
}

/// What the upload told us about itself.
#[derive(Debug, Clone, Copy)]
pub struct FileHints<'a> {
    pub bytes: &'a [u8],
    pub media_type: Option<&'a str>,
    pub filename: Option<&'a str>,
}

type Classifier = fn(&FileHints<'_>) -> Option<DocumentFormat>;

const CLASSIFIERS: &[Classifier] = &[
    by_pdf_signature,
    by_media_type,
    by_extension,
    by_zip_signature,
];

pub fn resolve_format(hints: &FileHints<'_>) -> DocumentFormat {
    CLASSIFIERS
        .iter()
        .find_map(|classify| classify(hints))
        .unwrap_or(DocumentFormat::Text)
}

/// True when the declared media type or the filename extension names one of
/// the accepted formats. Content sniffing does not count here.
pub fn is_supported_upload(media_type: Option<&str>, filename: Option<&str>) -> bool {
    let hints = FileHints {
        bytes: &[],
        media_type,
        filename,
    };
    by_media_type(&hints).is_some() || by_extension(&hints).is_some()
}

pub fn extract_text(bytes: &[u8], media_type: Option<&str>, filename: Option<&str>) -> String {
    let format = resolve_format(&FileHints {
        bytes,
        media_type,
        filename,
    });
    debug!(
        "Extracting {:?} from {} ({} bytes)",
        format,
        filename.unwrap_or("<unnamed>"),
        bytes.len()
    );

    match format {
        DocumentFormat::Pdf => pdf::extract(bytes),
        DocumentFormat::Docx => docx::extract(bytes),
        DocumentFormat::Text => text::decode(bytes),
    }
}

fn by_pdf_signature(hints: &FileHints<'_>) -> Option<DocumentFormat> {
    hints
        .bytes
        .starts_with(PDF_SIGNATURE)
        .then_some(DocumentFormat::Pdf)
}

fn by_media_type(hints: &FileHints<'_>) -> Option<DocumentFormat> {
    // Ignore parameters such as "; charset=utf-8".
    let essence = hints.media_type?.split(';').next()?.trim().to_ascii_lowercase();
    match essence.as_str() {
        MEDIA_PDF => Some(DocumentFormat::Pdf),
        MEDIA_DOC | MEDIA_DOCX => Some(DocumentFormat::Docx),
        MEDIA_TEXT => Some(DocumentFormat::Text),
        _ => None,
    }
}

fn by_extension(hints: &FileHints<'_>) -> Option<DocumentFormat> {
    let ext = Path::new(hints.filename?)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(DocumentFormat::Pdf),
        "doc" | "docx" => Some(DocumentFormat::Docx),
        "txt" => Some(DocumentFormat::Text),
        _ => None,
    }
}

fn by_zip_signature(hints: &FileHints<'_>) -> Option<DocumentFormat> {
    hints
        .bytes
        .starts_with(ZIP_SIGNATURE)
        .then_some(DocumentFormat::Docx)
}
