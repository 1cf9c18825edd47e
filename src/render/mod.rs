//! Rendering module: document body and metadata to the restricted HTML
//! subset consumed by the page layout engine.

mod html;
mod stylesheet;

pub use html::{to_html, HtmlRenderer};
pub use stylesheet::{load_stylesheet, DEFAULT_STYLESHEET};
