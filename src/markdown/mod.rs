//! Markdown parsing
//!
//! The widget parses the draft each frame the preview is visible; comrak is
//! fast enough that caching only pays off on very large documents, so the
//! document is rebuilt whenever the draft version moves.

pub mod parser;

pub use parser::{parse, parse_with_options, Document, ListKind, Node, NodeKind, ParseOptions};
