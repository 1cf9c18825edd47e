//! Polyglot embedding: one byte stream, two readers.
//!
//! An artifact produced here is a valid PDF and simultaneously carries the
//! original gemtext as a contiguous byte region. The gemtext lives in an
//! unreferenced stream object inserted directly after the PDF header line,
//! so PDF readers, which reach objects only through the cross-reference
//! table, never visit it, while text-oriented readers find the source
//! right at the top of the file. A signature comment on the second line
//! marks the artifact as ours.
//!
//! This module is the only place that reasons about byte offsets; the rest
//! of the pipeline treats artifacts as opaque.

mod xref;

use std::sync::OnceLock;

use log::debug;
use memchr::{memchr, memmem};
use regex::bytes::Regex;

use crate::error::{Error, Result};

/// Signature comment placed on the second line of every artifact:
/// `%` + Gemini zodiac sign + document glyph, both in text presentation.
pub const SIGNATURE: &str = "%\u{264A}\u{FE0E}\u{1F5CE}\u{FE0E}";

const PDF_MAGIC: &[u8] = b"%PDF-";
const STREAM_OPEN: &[u8] = b"stream\n";
const STREAM_CLOSE: &[u8] = b"\nendstream\nendobj\n";

/// Embed gemtext source bytes into a rendered PDF.
///
/// The PDF keeps its `%PDF-x.y` header line; after it come the signature
/// line and a new stream object holding `source` verbatim, and every
/// offset in the cross-reference table grows by the inserted length.
///
/// # Errors
///
/// Fails when the renderer output is not a classic-xref PDF, or when the
/// source contains the stream terminator sequence (or ends in a prefix
/// that completes it) and therefore cannot be represented as one
/// contiguous region.
pub fn embed(source: &[u8], pdf: &[u8]) -> Result<Vec<u8>> {
    if !pdf.starts_with(PDF_MAGIC) {
        return Err(Error::Embedding("renderer output is not a PDF".into()));
    }
    let header_end = memchr(b'\n', pdf)
        .ok_or_else(|| Error::Embedding("truncated PDF header".into()))?;
    let (header, tail) = pdf.split_at(header_end + 1);

    // The terminator must first occur exactly where it gets appended. A
    // source containing it, or ending in a prefix that the appended copy
    // completes, would make extraction find an earlier boundary.
    let framed = [source, STREAM_CLOSE].concat();
    if memmem::find(&framed, STREAM_CLOSE) != Some(source.len()) {
        return Err(Error::Embedding(
            "source contains the stream terminator sequence".into(),
        ));
    }

    let preamble = format!(
        "{}\n{} 0 obj\n<< /Length {} >>\nstream\n",
        SIGNATURE,
        next_object_number(pdf),
        source.len(),
    );
    let delta = preamble.len() + source.len() + STREAM_CLOSE.len();
    debug!("embedding {} source bytes, shifting offsets by {}", source.len(), delta);

    let shifted = xref::shift_offsets(tail, header.len() as u64, delta as u64)?;

    let mut artifact = Vec::with_capacity(pdf.len() + delta);
    artifact.extend_from_slice(header);
    artifact.extend_from_slice(preamble.as_bytes());
    artifact.extend_from_slice(source);
    artifact.extend_from_slice(STREAM_CLOSE);
    artifact.extend_from_slice(&shifted);
    Ok(artifact)
}

/// Recover the gemtext plane from a polyglot artifact.
///
/// The source is the region between the first `stream` keyword after the
/// signature line and the stream terminator. The terminator position is
/// cross-checked against the declared `/Length`; any disagreement fails
/// closed rather than guessing a boundary.
pub fn extract_source(artifact: &[u8]) -> Result<Vec<u8>> {
    if !is_polyglot(artifact) {
        return Err(Error::MissingSignature);
    }
    // is_polyglot guarantees a newline-terminated header line
    let after_header = memchr(b'\n', artifact).map(|i| i + 1).unwrap_or(0);

    let open = memmem::find(&artifact[after_header..], STREAM_OPEN)
        .map(|i| after_header + i + STREAM_OPEN.len())
        .ok_or_else(|| {
            Error::AmbiguousEmbedding("no stream object follows the signature".into())
        })?;
    let close = memmem::find(&artifact[open..], STREAM_CLOSE).ok_or_else(|| {
        Error::AmbiguousEmbedding("embedded stream is unterminated".into())
    })?;

    let declared = declared_length(&artifact[after_header..open])?;
    if declared != close as u64 {
        return Err(Error::AmbiguousEmbedding(format!(
            "declared length {} disagrees with terminator at offset {}",
            declared, close,
        )));
    }
    Ok(artifact[open..open + close].to_vec())
}

/// Whether the bytes are a polyglot artifact: a PDF carrying the
/// signature on its second line.
pub fn is_polyglot(data: &[u8]) -> bool {
    if !data.starts_with(PDF_MAGIC) {
        return false;
    }
    match memchr(b'\n', data) {
        Some(nl) => data[nl + 1..].starts_with(SIGNATURE.as_bytes()),
        None => false,
    }
}

/// Highest object number in use, plus one.
fn next_object_number(pdf: &[u8]) -> u64 {
    static OBJ_RE: OnceLock<Regex> = OnceLock::new();
    let re = OBJ_RE.get_or_init(|| {
        Regex::new(r"(?m)^(\d+) \d+ obj\b").expect("object number pattern")
    });
    re.captures_iter(pdf)
        .filter_map(|caps| parse_digits(&caps[1]))
        .max()
        .unwrap_or(0)
        + 1
}

/// Declared `/Length` of the stream dictionary region.
fn declared_length(dict: &[u8]) -> Result<u64> {
    static LENGTH_RE: OnceLock<Regex> = OnceLock::new();
    let re = LENGTH_RE
        .get_or_init(|| Regex::new(r"/Length\s+(\d+)").expect("length pattern"));
    let caps = re.captures(dict).ok_or_else(|| {
        Error::AmbiguousEmbedding("embedded stream declares no /Length".into())
    })?;
    parse_digits(&caps[1])
        .ok_or_else(|| Error::AmbiguousEmbedding("unparseable /Length value".into()))
}

fn parse_digits(bytes: &[u8]) -> Option<u64> {
    let mut value: u64 = 0;
    for &b in bytes {
        value = value.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
    }
    Some(value)
}
