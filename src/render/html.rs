//! HTML subset generation.
//!
//! The output uses a fixed set of constructs: `h1`-`h3`, `p`, `ul`/`li`,
//! `blockquote`, `pre`, `a`, `br`, plus the `colophon` element group the
//! stylesheet positions into the page footer. Consecutive list items share
//! one `ul`; consecutive quote lines share one `blockquote`.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::{Block, Link, Metadata};

/// Assemble body blocks, metadata, and a stylesheet into an HTML document.
///
/// The stylesheet is embedded verbatim in a `<style>` element. This layer
/// performs no filesystem or network access.
pub fn to_html(blocks: &[Block], meta: &Metadata, stylesheet: &str) -> String {
    HtmlRenderer::new().render(blocks, meta, stylesheet)
}

/// Renderer for the restricted HTML subset.
pub struct HtmlRenderer {
    out: String,
}

impl HtmlRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Render a complete HTML document.
    pub fn render(mut self, blocks: &[Block], meta: &Metadata, stylesheet: &str) -> String {
        self.out.push_str("<html><head>\n");
        if let Some(title) = meta.document_title() {
            self.line(&format!("<title>{}</title>", encode_text(&title)));
        }
        self.line("<style>");
        self.out.push_str(stylesheet);
        if !stylesheet.ends_with('\n') {
            self.out.push('\n');
        }
        self.line("</style>");
        self.line(&format!("<colophon>{}</colophon>", colophon(meta)));
        self.line("</head><body>");
        if let Some(ref title) = meta.title {
            self.line(&format!("<h1 class=\"title\">{}</h1>", encode_text(title)));
        }
        if let Some(ref subtitle) = meta.subtitle {
            self.line(&format!("<h2 class=\"subtitle\">{}</h2>", encode_text(subtitle)));
        }
        self.render_body(blocks);
        self.out.push_str("</body></html>\n");
        self.out
    }

    fn render_body(&mut self, blocks: &[Block]) {
        let mut i = 0;
        while i < blocks.len() {
            match &blocks[i] {
                Block::ListItem(_) => i = self.render_list(blocks, i),
                Block::Quote(_) => i = self.render_quote(blocks, i),
                block => {
                    self.render_block(block);
                    i += 1;
                }
            }
        }
    }

    /// Render a run of consecutive list items as one `ul`, returning the
    /// index past the run.
    fn render_list(&mut self, blocks: &[Block], start: usize) -> usize {
        self.line("<ul>");
        let mut i = start;
        while let Some(Block::ListItem(item)) = blocks.get(i) {
            self.line(&format!("<li>{}</li>", encode_text(item)));
            i += 1;
        }
        self.line("</ul>");
        i
    }

    /// Render a run of consecutive quote lines as one `blockquote`.
    fn render_quote(&mut self, blocks: &[Block], start: usize) -> usize {
        let mut lines = Vec::new();
        let mut i = start;
        while let Some(Block::Quote(quoted)) = blocks.get(i) {
            lines.push(encode_text(quoted).into_owned());
            i += 1;
        }
        self.line(&format!("<blockquote>{}</blockquote>", lines.join("<br />")));
        i
    }

    fn render_block(&mut self, block: &Block) {
        match block {
            Block::Heading { level, text } => {
                self.line(&format!("<h{0}>{1}</h{0}>", level, encode_text(text)));
            }
            Block::Preformatted { lines, alt } => {
                match alt {
                    Some(alt) => self.line(&format!(
                        "<pre aria-label=\"{}\">",
                        encode_double_quoted_attribute(alt)
                    )),
                    None => self.line("<pre>"),
                }
                for line in lines {
                    self.line(&encode_text(line));
                }
                self.line("</pre>");
            }
            Block::Link(link) => {
                self.line(&format!("<p>{}</p>", anchor(link)));
            }
            Block::Text(text) => {
                self.line(&format!("<p>{}</p>", encode_text(text)));
            }
            Block::LineBreak => self.line("<br />"),
            // Runs are handled by the caller
            Block::ListItem(item) => self.line(&format!("<li>{}</li>", encode_text(item))),
            Block::Quote(quoted) => {
                self.line(&format!("<blockquote>{}</blockquote>", encode_text(quoted)));
            }
        }
    }

    fn line(&mut self, content: &str) {
        self.out.push_str(content);
        self.out.push('\n');
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a link as an anchor element.
///
/// The scheme class becomes a CSS class so stylesheets can style link
/// families; the default class gets no class token. Label-less links show
/// the URL itself and carry `bare` so the stylesheet can suppress its
/// usual URL-in-brackets suffix.
fn anchor(link: &Link) -> String {
    let mut classes = Vec::new();
    if let Some(class) = link.class.css_class() {
        classes.push(class);
    }
    if !link.has_label() {
        classes.push("bare");
    }
    let class_attr = if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", classes.join(" "))
    };
    format!(
        "<a href=\"{}\"{}>{}</a>",
        encode_double_quoted_attribute(&link.url),
        class_attr,
        encode_text(link.display_text()),
    )
}

/// Emit the colophon element sequence.
///
/// `datesep` appears only between an author and a date; `urlsep` appears
/// only when a URL follows an author or date. All three fields absent
/// yields an empty colophon.
fn colophon(meta: &Metadata) -> String {
    let mut out = String::new();
    if let Some(ref author) = meta.author {
        out.push_str(&format!("<author>{}</author>", encode_text(author)));
    }
    if let Some(ref date) = meta.date {
        if !out.is_empty() {
            out.push_str("<datesep>, </datesep>");
        }
        out.push_str(&format!("<date>{}</date>", encode_text(date)));
    }
    if let Some(ref url) = meta.url {
        if !out.is_empty() {
            out.push_str("<urlsep><br /></urlsep>");
        }
        out.push_str(&format!(
            "<url><a href=\"{}\">{}</a></url>",
            encode_double_quoted_attribute(url),
            encode_text(url),
        ));
    }
    out
}
