//! Gemtext document builder.
//!
//! Assembles classified lines into the ordered block sequence and the
//! document metadata in a single forward pass.

use log::debug;

use super::line::{classify, ClassifyState, DirectiveKey, LineKind};
use crate::model::{Block, Link, Metadata};

/// Parse a gemtext document into its body blocks and metadata.
///
/// Body order mirrors source line order. Every blank line yields one
/// [`Block::LineBreak`]; preformatted regions collapse into a single
/// [`Block::Preformatted`]; the first heading, when it is level 1, is
/// lifted into [`Metadata::title`] (and a directly following level-2
/// heading into [`Metadata::subtitle`]) instead of appearing in the body.
///
/// # Example
///
/// ```
/// use gempress::parser::parse;
///
/// let (blocks, meta) = parse("# Hello\n\nSome text.\n");
/// assert_eq!(meta.title.as_deref(), Some("Hello"));
/// assert_eq!(blocks.len(), 2); // line break + paragraph
/// ```
pub fn parse(source: &str) -> (Vec<Block>, Metadata) {
    let mut builder = Builder::new();
    let mut state = ClassifyState::default();
    for line in source.lines() {
        let (kind, next) = classify(line, state);
        state = next;
        builder.push(kind);
    }
    let (blocks, meta) = builder.finish();
    debug!("parsed {} blocks, title: {:?}", blocks.len(), meta.title);
    (blocks, meta)
}

/// Title/subtitle lift progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lift {
    /// No heading seen yet; a level-1 heading would become the title.
    Awaiting,
    /// Title lifted; a level-2 heading before any other block becomes
    /// the subtitle.
    Subtitle,
    /// Lift closed; all further headings are ordinary body nodes.
    Done,
}

struct Builder {
    blocks: Vec<Block>,
    meta: Metadata,
    /// Accumulating preformatted region, when one is open.
    pre: Option<(Vec<String>, Option<String>)>,
    lift: Lift,
}

impl Builder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            meta: Metadata::new(),
            pre: None,
            lift: Lift::Awaiting,
        }
    }

    fn push(&mut self, kind: LineKind) {
        match kind {
            LineKind::PreformatToggle { alt } => match self.pre.take() {
                Some((lines, alt)) => self.blocks.push(Block::Preformatted { lines, alt }),
                None => self.pre = Some((Vec::new(), alt)),
            },
            LineKind::PreformatLine(line) => {
                if let Some((lines, _)) = self.pre.as_mut() {
                    lines.push(line);
                }
            }
            // Blank lines never close the subtitle window
            LineKind::Blank => self.blocks.push(Block::LineBreak),
            LineKind::Directive { key, value } => self.apply_directive(key, value),
            LineKind::Heading { level, text } => self.push_heading(level, text),
            LineKind::ListItem(item) => self.push_body(Block::ListItem(item)),
            LineKind::Quote(quoted) => self.push_body(Block::Quote(quoted)),
            LineKind::Link { url, label } => self.push_body(Block::Link(Link::new(url, label))),
            LineKind::Text(text) => self.push_body(Block::Text(text)),
        }
    }

    fn push_heading(&mut self, level: u8, text: String) {
        match (self.lift, level) {
            (Lift::Awaiting, 1) => {
                self.meta.title = Some(text);
                self.lift = Lift::Subtitle;
            }
            (Lift::Subtitle, 2) => {
                self.meta.subtitle = Some(text);
                self.lift = Lift::Done;
            }
            _ => {
                // Only the first heading is eligible for the lift, even
                // when it is not level 1.
                self.lift = Lift::Done;
                self.blocks.push(Block::Heading { level, text });
            }
        }
    }

    fn push_body(&mut self, block: Block) {
        if self.lift == Lift::Subtitle {
            self.lift = Lift::Done;
        }
        self.blocks.push(block);
    }

    fn apply_directive(&mut self, key: DirectiveKey, value: String) {
        let slot = match key {
            DirectiveKey::Author => &mut self.meta.author,
            DirectiveKey::Date => &mut self.meta.date,
            DirectiveKey::Url => &mut self.meta.url,
            DirectiveKey::Subject => &mut self.meta.subject,
            DirectiveKey::Keywords => &mut self.meta.keywords,
        };
        *slot = Some(value);
    }

    fn finish(mut self) -> (Vec<Block>, Metadata) {
        // An unterminated preformatted block closes at end of input.
        if let Some((lines, alt)) = self.pre.take() {
            self.blocks.push(Block::Preformatted { lines, alt });
        }
        (self.blocks, self.meta)
    }
}
