//! # gempress
//!
//! Convert gemtext documents into gemtext/PDF polyglot files.
//!
//! A gempress artifact is one byte stream with two readings: a PDF reader
//! renders the typeset page document, while the original gemtext source
//! sits verbatim near the top of the file as a contiguous, recoverable
//! region. Converting an artifact again recovers the gemtext plane first,
//! so files can be edited and re-converted in place indefinitely.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gempress::convert::{write_artifact, Converter};
//!
//! fn main() -> gempress::Result<()> {
//!     let source = std::fs::read_to_string("document.gmi")?;
//!     let artifact = Converter::new().convert(&source)?;
//!     write_artifact("document.pdf".as_ref(), &artifact)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Parse**: classify gemtext lines and build the block sequence plus
//!   document metadata (title lift, `%!GEMDOC` directives).
//! - **Assemble**: produce a restricted HTML subset with the stylesheet
//!   embedded.
//! - **Render**: hand the HTML to an external layout engine
//!   ([`convert::PageRenderer`]) for typesetting.
//! - **Embed**: splice the original source bytes into the rendered PDF
//!   ([`polyglot`]) and repoint its cross-reference offsets.

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod polyglot;
pub mod render;

#[cfg(test)]
mod test_fixtures;

// Re-export commonly used types
pub use convert::{write_artifact, CommandRenderer, Converter, Fetcher, PageRenderer};
pub use detect::{detect_format, InputFormat};
pub use error::{Error, Result};
pub use model::{Block, Link, LinkClass, Metadata};
pub use parser::parse;
pub use polyglot::{embed, extract_source, is_polyglot, SIGNATURE};
pub use render::{load_stylesheet, to_html, DEFAULT_STYLESHEET};

use std::path::Path;

/// Convert a gemtext or polyglot file into a fresh artifact using the
/// default layout engine.
///
/// # Example
///
/// ```no_run
/// let artifact = gempress::convert_file("document.gmi").unwrap();
/// std::fs::write("document.pdf", artifact).unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let input = std::fs::read(path)?;
    Converter::new().convert_input(&input)
}

/// Convert gemtext source text into an artifact using the default layout
/// engine.
pub fn convert_str(source: &str) -> Result<Vec<u8>> {
    Converter::new().convert(source)
}

/// Translate gemtext into the restricted HTML subset with the default
/// stylesheet, without rendering or embedding anything.
///
/// # Example
///
/// ```
/// let html = gempress::gemtext_to_html("# Hello\n");
/// assert!(html.contains("<h1 class=\"title\">Hello</h1>"));
/// ```
pub fn gemtext_to_html(source: &str) -> String {
    let (blocks, meta) = parser::parse(source);
    render::to_html(&blocks, &meta, DEFAULT_STYLESHEET)
}
