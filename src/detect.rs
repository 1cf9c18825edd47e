//! Input format detection.

use crate::polyglot;

/// What kind of document an input byte stream is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Plain gemtext source.
    Gemtext,
    /// A polyglot artifact with a recoverable gemtext plane.
    Polyglot,
    /// A PDF without the polyglot signature; it has no gemtext plane.
    ForeignPdf,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Gemtext => "gemtext",
            Self::Polyglot => "polyglot",
            Self::ForeignPdf => "foreign PDF",
        };
        write!(f, "{}", name)
    }
}

/// PDF magic bytes.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Detect the input format from leading bytes.
///
/// Anything that does not look like a PDF is treated as gemtext; gemtext
/// has no magic of its own, and unrecognized lines degrade to plain text
/// during parsing anyway.
pub fn detect_format(data: &[u8]) -> InputFormat {
    if !data.starts_with(PDF_MAGIC) {
        return InputFormat::Gemtext;
    }
    if polyglot::is_polyglot(data) {
        InputFormat::Polyglot
    } else {
        InputFormat::ForeignPdf
    }
}
