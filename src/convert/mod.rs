//! Conversion pipeline: gemtext in, polyglot artifact out.
//!
//! One conversion is one linear, single-threaded run: parse the source,
//! assemble the HTML subset, render it through the layout collaborator,
//! and embed the original source bytes into the result. Everything is
//! assembled in memory; nothing touches the output path until the whole
//! artifact exists.

mod renderer;

pub use renderer::{CommandRenderer, PageRenderer};

use std::io::Write;
use std::path::Path;

use log::{debug, warn};

use crate::detect::{detect_format, InputFormat};
use crate::error::{Error, Result};
use crate::{parser, polyglot, render};

/// Retrieves remote source documents.
///
/// The transport is a collaborator consumed behind this trait; the gemini
/// implementation lives in the CLI crate. Failures surface verbatim, with
/// no retry logic in the pipeline.
pub trait Fetcher {
    /// Fetch raw source bytes for a URL.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// The conversion pipeline.
///
/// # Example
///
/// ```no_run
/// use gempress::convert::Converter;
///
/// fn main() -> gempress::Result<()> {
///     let converter = Converter::new();
///     let artifact = converter.convert("# Hello\n\nSome text.\n")?;
///     gempress::convert::write_artifact("hello.pdf".as_ref(), &artifact)?;
///     Ok(())
/// }
/// ```
pub struct Converter<R = CommandRenderer> {
    renderer: R,
    stylesheet: Option<String>,
    source_url: Option<String>,
}

impl Converter<CommandRenderer> {
    /// Create a converter with the default layout engine invocation.
    pub fn new() -> Self {
        Self::with_renderer(CommandRenderer::new())
    }
}

impl Default for Converter<CommandRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PageRenderer> Converter<R> {
    /// Create a converter around a specific renderer.
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            stylesheet: None,
            source_url: None,
        }
    }

    /// Use a stylesheet other than the built-in default.
    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = Some(stylesheet.into());
        self
    }

    /// Record where the source was fetched from.
    ///
    /// Used as the colophon URL when the document itself declares none.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Convert gemtext source into a polyglot artifact.
    pub fn convert(&self, source: &str) -> Result<Vec<u8>> {
        let (blocks, mut meta) = parser::parse(source);
        if meta.url.is_none() {
            meta.url = self.source_url.clone();
        }
        let stylesheet = self
            .stylesheet
            .as_deref()
            .unwrap_or(render::DEFAULT_STYLESHEET);
        let html = render::to_html(&blocks, &meta, stylesheet);
        let pdf = self.renderer.render(html.as_bytes())?;
        debug!("rendered {} bytes of PDF", pdf.len());
        polyglot::embed(source.as_bytes(), &pdf)
    }

    /// Convert input bytes that may be gemtext or an existing artifact.
    ///
    /// A polyglot input has its gemtext plane recovered first, so
    /// converting a file in place never stacks a second embedded PDF on
    /// top of a stale one. A PDF without the signature is rejected.
    pub fn convert_input(&self, input: &[u8]) -> Result<Vec<u8>> {
        let source = match detect_format(input) {
            InputFormat::Gemtext => input.to_vec(),
            InputFormat::Polyglot => polyglot::extract_source(input)?,
            InputFormat::ForeignPdf => return Err(Error::MissingSignature),
        };
        let source = match String::from_utf8(source) {
            Ok(source) => source,
            Err(err) => {
                warn!("source is not valid UTF-8; converting lossily");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        self.convert(&source)
    }
}

/// Write an artifact without ever leaving a partial file behind.
///
/// The bytes go to a temporary file in the target's directory first and
/// are renamed over the target only once fully written, so a failed run
/// never truncates an existing artifact.
pub fn write_artifact(path: &Path, artifact: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(artifact)?;
    file.persist(path).map_err(|e| Error::Io(e.error))?;
    debug!("wrote {} bytes to {}", artifact.len(), path.display());
    Ok(())
}
