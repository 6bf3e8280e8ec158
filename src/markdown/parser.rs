//! Markdown parsing on top of comrak
//!
//! Wraps comrak's arena parser into an owned AST the preview can walk
//! without lifetimes. Each node carries the byte span of its source text,
//! which is what lets emphasis nodes be re-examined against the raw
//! delimiters they were written with.

use comrak::{
    nodes::{AstNode, ListType as ComrakListType, NodeValue, Sourcepos},
    parse_document, Arena, Options,
};

use crate::text::{ceil_char_boundary, floor_char_boundary};
use crate::underline::{self, SpanStyle};

// ─────────────────────────────────────────────────────────────────────────────
// Parse Options
// ─────────────────────────────────────────────────────────────────────────────

/// Which markdown extensions the parser enables.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// GitHub Flavored Markdown tables
    pub tables: bool,
    /// Strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Autolink bare URLs
    pub autolink: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklist: true,
            autolink: true,
        }
    }
}

impl ParseOptions {
    fn to_comrak(&self) -> Options {
        let mut options = Options::default();
        options.extension.table = self.tables;
        options.extension.strikethrough = self.strikethrough;
        options.extension.tasklist = self.tasklist;
        options.extension.autolink = self.autolink;
        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node Types
// ─────────────────────────────────────────────────────────────────────────────

/// List kind for [`NodeKind::List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered { start: u32 },
}

/// The kind of a markdown node, with the payload the preview needs.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading(u8),
    BlockQuote,
    List { kind: ListKind, tight: bool },
    Item,
    TaskItem { checked: bool },
    CodeBlock { language: String, literal: String },
    ThematicBreak,
    Text(String),
    Code(String),
    SoftBreak,
    LineBreak,
    /// Single-delimiter emphasis, already split into italic vs underline
    /// by looking at the source delimiters.
    Emphasis(SpanStyle),
    Strong,
    Strikethrough,
    Link { url: String },
    Image { url: String },
    /// Raw HTML, inline or block; rendered as plain text.
    Html(String),
}

/// An owned markdown AST node with its source byte span.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    /// Byte range in the source text, clamped to char boundaries.
    pub span: (usize, usize),
}

impl Node {
    /// Plain text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(t) | NodeKind::Code(t) | NodeKind::Html(t) => out.push_str(t),
            NodeKind::CodeBlock { literal, .. } => out.push_str(literal),
            NodeKind::SoftBreak => out.push(' '),
            NodeKind::LineBreak => out.push('\n'),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// A parsed document: the owned AST root plus the source it came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Node,
    source: String,
}

impl Document {
    /// Source text for a node's span.
    pub fn source_of(&self, node: &Node) -> &str {
        &self.source[node.span.0..node.span.1]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse markdown into an owned [`Document`].
pub fn parse(markdown: &str) -> Document {
    parse_with_options(markdown, &ParseOptions::default())
}

pub fn parse_with_options(markdown: &str, options: &ParseOptions) -> Document {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &options.to_comrak());

    let map = SourceMap::new(markdown);
    let root = convert(root, markdown, &map);

    Document {
        root,
        source: markdown.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Source Map
// ─────────────────────────────────────────────────────────────────────────────

/// Maps comrak's 1-based line/column positions to byte offsets.
struct SourceMap {
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceMap {
    fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Convert a sourcepos (end column inclusive) to a byte range.
    /// Nodes comrak gives no position for collapse to an empty span.
    fn span(&self, text: &str, pos: Sourcepos) -> (usize, usize) {
        if pos.start.line == 0 || pos.end.line == 0 {
            return (0, 0);
        }
        let start = self
            .line_starts
            .get(pos.start.line - 1)
            .map(|base| base + pos.start.column.saturating_sub(1))
            .unwrap_or(self.len)
            .min(self.len);
        let end = self
            .line_starts
            .get(pos.end.line - 1)
            .map(|base| base + pos.end.column)
            .unwrap_or(self.len)
            .min(self.len);
        let start = floor_char_boundary(text, start.min(end));
        let end = ceil_char_boundary(text, end.max(start));
        (start, end)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

fn convert<'a>(node: &'a AstNode<'a>, source: &str, map: &SourceMap) -> Node {
    let ast = node.data.borrow();
    let span = map.span(source, ast.sourcepos);
    let kind = convert_value(&ast.value, source, span);

    let children = node
        .children()
        .map(|child| convert(child, source, map))
        .collect();

    Node {
        kind,
        children,
        span,
    }
}

fn convert_value(value: &NodeValue, source: &str, span: (usize, usize)) -> NodeKind {
    match value {
        NodeValue::Document => NodeKind::Document,
        NodeValue::Paragraph => NodeKind::Paragraph,
        NodeValue::Heading(heading) => NodeKind::Heading(heading.level),
        NodeValue::BlockQuote => NodeKind::BlockQuote,
        NodeValue::List(list) => NodeKind::List {
            kind: match list.list_type {
                ComrakListType::Bullet => ListKind::Bullet,
                ComrakListType::Ordered => ListKind::Ordered {
                    start: list.start as u32,
                },
            },
            tight: list.tight,
        },
        NodeValue::Item(_) => NodeKind::Item,
        NodeValue::TaskItem(checked) => NodeKind::TaskItem {
            checked: checked.is_some_and(|c| c == 'x' || c == 'X'),
        },
        NodeValue::CodeBlock(code) => NodeKind::CodeBlock {
            language: code.info.clone(),
            literal: code.literal.clone(),
        },
        NodeValue::ThematicBreak => NodeKind::ThematicBreak,
        NodeValue::Text(text) => NodeKind::Text(text.clone()),
        NodeValue::Code(code) => NodeKind::Code(code.literal.clone()),
        NodeValue::SoftBreak => NodeKind::SoftBreak,
        NodeValue::LineBreak => NodeKind::LineBreak,
        NodeValue::Emph => {
            // Look at the source delimiters: _text_ renders underlined,
            // *text* stays italic.
            NodeKind::Emphasis(underline::classify_span(&source[span.0..span.1]))
        }
        NodeValue::Strong => NodeKind::Strong,
        NodeValue::Strikethrough => NodeKind::Strikethrough,
        NodeValue::Link(link) => NodeKind::Link {
            url: link.url.clone(),
        },
        NodeValue::Image(image) => NodeKind::Image {
            url: image.url.clone(),
        },
        NodeValue::HtmlBlock(html) => NodeKind::Html(html.literal.clone()),
        NodeValue::HtmlInline(html) => NodeKind::Html(html.clone()),
        // Anything else renders as its plain text
        _ => NodeKind::Text(String::new()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
