//! Cross-reference table rewriting.
//!
//! Embedding inserts bytes between the PDF header line and the rest of the
//! file, so every absolute byte offset recorded in the cross-reference
//! table must grow by the inserted length. In-use (`n`) entries hold
//! offsets and are rewritten in place; free (`f`) entries hold object
//! numbers and are left alone. Only single-section classic tables are
//! supported: incremental updates would need `/Prev` offsets resized,
//! which changes byte lengths and breaks every later offset, and
//! cross-reference streams keep their offsets compressed where a textual
//! rewrite cannot reach them.

use memchr::memmem;

use crate::error::{Error, Result};

const STARTXREF: &[u8] = b"startxref";

/// Shift every absolute offset in `tail` (the PDF minus its header line)
/// by `delta` bytes. `header_len` is the length of the removed header, so
/// absolute file offsets map to `tail` indices by subtracting it.
pub(crate) fn shift_offsets(tail: &[u8], header_len: u64, delta: u64) -> Result<Vec<u8>> {
    if memmem::find_iter(tail, STARTXREF).count() != 1 {
        return Err(Error::Embedding(
            "incrementally updated PDFs are not supported".into(),
        ));
    }
    if memmem::find(tail, b"/Prev").is_some() || memmem::find(tail, b"/XRefStm").is_some() {
        return Err(Error::Embedding(
            "incrementally updated PDFs are not supported".into(),
        ));
    }

    let sx = memmem::find(tail, STARTXREF)
        .ok_or_else(|| Error::Embedding("missing startxref".into()))?;
    let value_at = skip_ws(tail, sx + STARTXREF.len());
    let (xref_pos, value_len) = parse_uint(&tail[value_at..])
        .ok_or_else(|| Error::Embedding("malformed startxref offset".into()))?;

    let xref_at = xref_pos
        .checked_sub(header_len)
        .map(|pos| pos as usize)
        .filter(|&pos| pos < tail.len())
        .ok_or_else(|| Error::Embedding("startxref points outside the file body".into()))?;
    if !tail[xref_at..].starts_with(b"xref") {
        return Err(Error::Embedding(
            "cross-reference streams are not supported".into(),
        ));
    }

    let mut out = tail.to_vec();
    shift_table(tail, &mut out, xref_at + 4, delta)?;

    // The startxref value sits at the end of the file, so its byte length
    // is free to change.
    let shifted = (xref_pos + delta).to_string();
    out.splice(value_at..value_at + value_len, shifted.into_bytes());
    Ok(out)
}

/// Rewrite every in-use entry of the table starting right after the `xref`
/// keyword at `from`.
fn shift_table(tail: &[u8], out: &mut [u8], from: usize, delta: u64) -> Result<()> {
    let mut i = skip_ws(tail, from);
    while !tail[i..].starts_with(b"trailer") {
        let (_, len) = parse_uint(&tail[i..])
            .ok_or_else(|| Error::Embedding("malformed xref subsection header".into()))?;
        i = skip_ws(tail, i + len);
        let (count, len) = parse_uint(&tail[i..])
            .ok_or_else(|| Error::Embedding("malformed xref subsection header".into()))?;
        i = skip_ws(tail, i + len);

        for _ in 0..count {
            // Entry layout: 10-digit offset, space, 5-digit generation,
            // space, type byte.
            if i + 18 > tail.len() {
                return Err(Error::Embedding("truncated xref entry".into()));
            }
            let (value, len) = parse_uint(&tail[i..i + 10])
                .ok_or_else(|| Error::Embedding("malformed xref entry".into()))?;
            match (len, tail[i + 17]) {
                (10, b'n') => {
                    let shifted = value + delta;
                    if shifted > 9_999_999_999 {
                        return Err(Error::Embedding("shifted offset exceeds ten digits".into()));
                    }
                    out[i..i + 10].copy_from_slice(format!("{:010}", shifted).as_bytes());
                }
                (10, b'f') => {}
                _ => return Err(Error::Embedding("malformed xref entry".into())),
            }
            i = skip_ws(tail, i + 18);
        }
    }
    Ok(())
}

/// Parse leading ASCII digits, returning the value and digit count.
fn parse_uint(bytes: &[u8]) -> Option<(u64, usize)> {
    let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    let mut value: u64 = 0;
    for &b in &bytes[..len] {
        value = value.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
    }
    Some((value, len))
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && matches!(bytes[i], b' ' | b'\r' | b'\n' | b'\t') {
        i += 1;
    }
    i
}
