//! Gemtext parsing module.

mod gemtext;
mod line;

pub use gemtext::parse;
pub use line::{classify, ClassifyState, DirectiveKey, LineKind};
