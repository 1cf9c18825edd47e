//! Block-level nodes of the markup body.

use serde::{Deserialize, Serialize};

/// A block-level node in the document body.
///
/// The body is an ordered sequence of blocks mirroring source line order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// A heading with level 1-3 and its text.
    Heading { level: u8, text: String },

    /// One bullet list item.
    ListItem(String),

    /// One quoted line.
    Quote(String),

    /// A preformatted region bounded by toggle markers in the source.
    Preformatted {
        /// Verbatim content lines, markers excluded.
        lines: Vec<String>,
        /// Alt label captured from the opening toggle, if any.
        alt: Option<String>,
    },

    /// A link line.
    Link(Link),

    /// An ordinary text line.
    Text(String),

    /// An explicit line break produced by one blank source line.
    LineBreak,
}

/// A link with its URL, optional label, and scheme classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link target as written in the source.
    pub url: String,

    /// Label text, or `None` when the source line carried no label.
    ///
    /// An absent label is distinct from an empty one: label-less links
    /// display the URL itself, and stylesheets use the distinction to
    /// suppress printing the URL twice.
    pub label: Option<String>,

    /// Scheme-derived classification.
    pub class: LinkClass,
}

impl Link {
    /// Create a link, deriving the scheme class from the URL.
    pub fn new(url: impl Into<String>, label: Option<String>) -> Self {
        let url = url.into();
        let class = LinkClass::from_url(&url);
        Self { url, label, class }
    }

    /// Whether the source line carried a label.
    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// Text to display for this link: the label, or the URL itself.
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.url)
    }
}

/// Scheme classification for link styling.
///
/// Named classes cover the schemes the default stylesheet styles
/// specially; every other scheme (including relative URLs with no scheme)
/// falls into the default class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkClass {
    /// `gemini://` links.
    Gemini,
    /// `gopher://` links.
    Gopher,
    /// `mailto:` links.
    Mailto,
    /// Any other scheme, or no scheme at all.
    #[default]
    Other,
}

impl LinkClass {
    /// Classify a URL by the token before its first `:`.
    pub fn from_url(url: &str) -> Self {
        let scheme = match url.split_once(':') {
            Some((scheme, _)) => scheme,
            None => return Self::Other,
        };
        match scheme.to_ascii_lowercase().as_str() {
            "gemini" => Self::Gemini,
            "gopher" => Self::Gopher,
            "mailto" => Self::Mailto,
            _ => Self::Other,
        }
    }

    /// CSS class name for this classification, if it has one.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::Gemini => Some("gemini"),
            Self::Gopher => Some("gopher"),
            Self::Mailto => Some("mailto"),
            Self::Other => None,
        }
    }
}
