//! Document model types for gemtext content representation.
//!
//! This module defines the intermediate representation that bridges gemtext
//! parsing and HTML generation. Blocks mirror source order exactly; the
//! model carries no layout information of its own.

mod meta;
mod node;

pub use meta::Metadata;
pub use node::{Block, Link, LinkClass};
