//! Line classification for gemtext source.
//!
//! Classification is a pure function of the line text plus one piece of
//! carried state: whether the cursor is inside a preformatted block. The
//! caller threads [`ClassifyState`] through a fold over the line sequence.

/// Carried classification state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyState {
    /// Inside a preformatted block.
    pub preformatted: bool,
}

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Heading with level 1-3 and the text after the marker.
    Heading { level: u8, text: String },

    /// Bullet list item content.
    ListItem(String),

    /// Quoted line content.
    Quote(String),

    /// Preformat toggle; `alt` is the label on an opening toggle.
    PreformatToggle { alt: Option<String> },

    /// Verbatim line inside a preformatted block.
    PreformatLine(String),

    /// Link line with URL and optional label.
    Link { url: String, label: Option<String> },

    /// `%!GEMDOC` metadata directive.
    Directive { key: DirectiveKey, value: String },

    /// Ordinary text line.
    Text(String),

    /// Blank line.
    Blank,
}

/// Metadata keys accepted in `%!GEMDOC` directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKey {
    Author,
    Date,
    Url,
    Subject,
    Keywords,
}

impl DirectiveKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "author" => Some(Self::Author),
            "date" => Some(Self::Date),
            // `uri` is accepted as an alias
            "url" | "uri" => Some(Self::Url),
            "subject" => Some(Self::Subject),
            "keywords" => Some(Self::Keywords),
            _ => None,
        }
    }
}

const PREFORMAT_MARKER: &str = "```";
const DIRECTIVE_MARKER: &str = "%!GEMDOC";

/// Classify one source line.
///
/// Longest-prefix rules apply (`### ` before `## ` before `# `). Lines that
/// resemble a construct but are malformed, such as a link line with no URL
/// or a directive with an unknown key, degrade to [`LineKind::Text`] and
/// never fail.
pub fn classify(line: &str, state: ClassifyState) -> (LineKind, ClassifyState) {
    if state.preformatted {
        return if line.starts_with(PREFORMAT_MARKER) {
            // Trailing text on a closing toggle is ignored.
            (
                LineKind::PreformatToggle { alt: None },
                ClassifyState { preformatted: false },
            )
        } else {
            (LineKind::PreformatLine(line.to_string()), state)
        };
    }

    if let Some(rest) = line.strip_prefix(PREFORMAT_MARKER) {
        let alt = rest.trim();
        let alt = (!alt.is_empty()).then(|| alt.to_string());
        return (
            LineKind::PreformatToggle { alt },
            ClassifyState { preformatted: true },
        );
    }

    let kind = if let Some(rest) = line.strip_prefix(DIRECTIVE_MARKER) {
        classify_directive(rest).unwrap_or_else(|| LineKind::Text(line.to_string()))
    } else if let Some(text) = line.strip_prefix("### ") {
        LineKind::Heading { level: 3, text: text.trim().to_string() }
    } else if let Some(text) = line.strip_prefix("## ") {
        LineKind::Heading { level: 2, text: text.trim().to_string() }
    } else if let Some(text) = line.strip_prefix("# ") {
        LineKind::Heading { level: 1, text: text.trim().to_string() }
    } else if let Some(item) = line.strip_prefix("* ") {
        LineKind::ListItem(item.to_string())
    } else if let Some(quoted) = line.strip_prefix('>') {
        LineKind::Quote(quoted.to_string())
    } else if let Some(rest) = line.strip_prefix("=>") {
        classify_link(rest).unwrap_or_else(|| LineKind::Text(line.to_string()))
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text(line.to_string())
    };

    (kind, state)
}

/// Split a link line body into URL and optional label.
///
/// The URL is the first whitespace-delimited token; the label is the
/// trimmed remainder. A remainder that trims to nothing means the label is
/// absent, not empty.
fn classify_link(rest: &str) -> Option<LineKind> {
    let rest = rest.trim_start();
    let url_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (url, remainder) = rest.split_at(url_end);
    if url.is_empty() {
        return None;
    }
    let label = remainder.trim();
    let label = (!label.is_empty()).then(|| label.to_string());
    Some(LineKind::Link { url: url.to_string(), label })
}

fn classify_directive(rest: &str) -> Option<LineKind> {
    let (key, value) = rest.trim_start().split_once('=')?;
    let key = DirectiveKey::parse(key.trim())?;
    Some(LineKind::Directive { key, value: value.trim().to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_fresh(line: &str) -> LineKind {
        classify(line, ClassifyState::default()).0
    }

    #[test]
    fn test_headings() {
        assert_eq!(
            classify_fresh("# Title"),
            LineKind::Heading { level: 1, text: "Title".into() }
        );
        assert_eq!(
            classify_fresh("## Sub"),
            LineKind::Heading { level: 2, text: "Sub".into() }
        );
        assert_eq!(
            classify_fresh("### Deep"),
            LineKind::Heading { level: 3, text: "Deep".into() }
        );
        // No separating space: ordinary text
        assert_eq!(classify_fresh("#Title"), LineKind::Text("#Title".into()));
    }

    #[test]
    fn test_list_and_quote() {
        assert_eq!(classify_fresh("* item"), LineKind::ListItem("item".into()));
        assert_eq!(classify_fresh("> quoted"), LineKind::Quote(" quoted".into()));
        assert_eq!(classify_fresh(">bare"), LineKind::Quote("bare".into()));
    }

    #[test]
    fn test_link_with_label() {
        assert_eq!(
            classify_fresh("=> gemini://example.org/page Example Page"),
            LineKind::Link {
                url: "gemini://example.org/page".into(),
                label: Some("Example Page".into()),
            }
        );
    }

    #[test]
    fn test_link_without_label() {
        assert_eq!(
            classify_fresh("=> gemini://example.org/page"),
            LineKind::Link { url: "gemini://example.org/page".into(), label: None }
        );
        // Trailing whitespace only still means no label
        assert_eq!(
            classify_fresh("=> gemini://example.org/page   "),
            LineKind::Link { url: "gemini://example.org/page".into(), label: None }
        );
    }

    #[test]
    fn test_link_without_url_degrades_to_text() {
        assert_eq!(classify_fresh("=> "), LineKind::Text("=> ".into()));
        assert_eq!(classify_fresh("=>"), LineKind::Text("=>".into()));
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify_fresh(""), LineKind::Blank);
        assert_eq!(classify_fresh("   "), LineKind::Blank);
    }

    #[test]
    fn test_preformat_state_threading() {
        let (kind, state) = classify("``` rust", ClassifyState::default());
        assert_eq!(kind, LineKind::PreformatToggle { alt: Some("rust".into()) });
        assert!(state.preformatted);

        // Marker-like content inside the block stays verbatim
        let (kind, state) = classify("# not a heading", state);
        assert_eq!(kind, LineKind::PreformatLine("# not a heading".into()));
        assert!(state.preformatted);

        let (kind, state) = classify("```", state);
        assert_eq!(kind, LineKind::PreformatToggle { alt: None });
        assert!(!state.preformatted);
    }

    #[test]
    fn test_directives() {
        assert_eq!(
            classify_fresh("%!GEMDOC author = Jane Doe"),
            LineKind::Directive { key: DirectiveKey::Author, value: "Jane Doe".into() }
        );
        assert_eq!(
            classify_fresh("%!GEMDOC uri=gemini://example.org/doc.gmi"),
            LineKind::Directive {
                key: DirectiveKey::Url,
                value: "gemini://example.org/doc.gmi".into(),
            }
        );
    }

    #[test]
    fn test_malformed_directive_degrades_to_text() {
        assert_eq!(
            classify_fresh("%!GEMDOC publisher = ACME"),
            LineKind::Text("%!GEMDOC publisher = ACME".into())
        );
        assert_eq!(
            classify_fresh("%!GEMDOC no equals sign"),
            LineKind::Text("%!GEMDOC no equals sign".into())
        );
    }
}
