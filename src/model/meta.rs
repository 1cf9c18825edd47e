//! Document-level metadata.

use serde::{Deserialize, Serialize};

/// Metadata lifted from the document or supplied by the caller.
///
/// Every field is independently optional. Title and subtitle come from the
/// first-heading lift during parsing; the colophon fields (author, date,
/// source URL) come from `%!GEMDOC` directives or from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title, from the first level-1 heading.
    pub title: Option<String>,

    /// Document subtitle, from a level-2 heading directly under the title.
    pub subtitle: Option<String>,

    /// Author shown in the colophon.
    pub author: Option<String>,

    /// Date shown in the colophon, carried as an opaque string.
    pub date: Option<String>,

    /// Source URL shown in the colophon.
    pub url: Option<String>,

    /// Document subject, carried for document metadata only.
    pub subject: Option<String>,

    /// Keywords, carried for document metadata only.
    pub keywords: Option<String>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Combined display title.
    ///
    /// A subtitle is appended with `: ` unless the title already ends in
    /// punctuation, in which case a plain space joins them.
    pub fn document_title(&self) -> Option<String> {
        match (&self.title, &self.subtitle) {
            (Some(title), Some(subtitle)) => {
                let punctuated = title.ends_with(['.', ',', ';', ':', '?', '!']);
                if punctuated {
                    Some(format!("{} {}", title, subtitle))
                } else {
                    Some(format!("{}: {}", title, subtitle))
                }
            }
            (Some(title), None) => Some(title.clone()),
            (None, _) => None,
        }
    }

    /// Whether any colophon field is set.
    pub fn has_colophon(&self) -> bool {
        self.author.is_some() || self.date.is_some() || self.url.is_some()
    }
}
