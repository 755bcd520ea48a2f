// SPDX-License-Identifier: AGPL-3.0-or-later
//! Rich-text content tree
//!
//! The tree mirrors the node shape stored by the content editor: a root
//! container holding block nodes (paragraphs, lists, headings, quotes) whose
//! leaves are formatted text runs. Node types the tree does not recognise are
//! kept as `Generic` containers so their text is never lost.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::BitOr;

/// Format bits carried by a text node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextFormat(u32);

impl TextFormat {
    pub const PLAIN: Self = Self(0);
    pub const BOLD: Self = Self(1);
    pub const ITALIC: Self = Self(1 << 1);
    pub const STRIKETHROUGH: Self = Self(1 << 2);
    pub const UNDERLINE: Self = Self(1 << 3);
    pub const CODE: Self = Self(1 << 4);

    /// Build from raw editor bits. Unknown bits are kept but never rendered.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_bold(&self) -> bool {
        self.contains(Self::BOLD)
    }

    pub const fn is_italic(&self) -> bool {
        self.contains(Self::ITALIC)
    }

    pub const fn is_strikethrough(&self) -> bool {
        self.contains(Self::STRIKETHROUGH)
    }

    pub const fn is_underline(&self) -> bool {
        self.contains(Self::UNDERLINE)
    }

    pub const fn is_code(&self) -> bool {
        self.contains(Self::CODE)
    }
}

impl BitOr for TextFormat {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// List flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Unordered,
    Ordered,
    /// Checklist; rendered as an unordered list
    Check,
}

impl ListKind {
    /// Resolve from the editor's `listType`, falling back to the `tag`
    fn from_editor(list_type: Option<&str>, tag: Option<&str>) -> Self {
        match (list_type, tag) {
            (Some("number"), _) => Self::Ordered,
            (Some("check"), _) => Self::Check,
            (Some("bullet"), _) => Self::Unordered,
            (_, Some("ol")) => Self::Ordered,
            _ => Self::Unordered,
        }
    }

    const fn editor_name(&self) -> &'static str {
        match self {
            Self::Unordered => "bullet",
            Self::Ordered => "number",
            Self::Check => "check",
        }
    }

    /// HTML container tag for this list
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered | Self::Check => "ul",
        }
    }
}

/// One node of the rich-text tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum ContentNode {
    /// Literal text run
    Text { text: String, format: TextFormat },

    /// Block-level paragraph
    Paragraph { children: Vec<ContentNode> },

    /// Ordered or unordered list; children are normally `ListItem`s
    List {
        kind: ListKind,
        children: Vec<ContentNode>,
    },

    /// Single entry of a list
    ListItem { children: Vec<ContentNode> },

    /// Heading with level 1-6
    Heading { level: u8, children: Vec<ContentNode> },

    /// Block quote
    Quote { children: Vec<ContentNode> },

    /// Hyperlink around inline children
    Link {
        url: String,
        new_tab: bool,
        children: Vec<ContentNode>,
    },

    /// Hard line break
    LineBreak,

    /// Any other node type; contributes its children but no markup
    Generic {
        node_type: Option<String>,
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// Plain text run
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            format: TextFormat::PLAIN,
        }
    }

    /// Text run with format bits
    pub fn formatted(text: impl Into<String>, format: TextFormat) -> Self {
        Self::Text {
            text: text.into(),
            format,
        }
    }

    pub fn paragraph(children: Vec<ContentNode>) -> Self {
        Self::Paragraph { children }
    }

    pub fn list(kind: ListKind, items: Vec<ContentNode>) -> Self {
        Self::List {
            kind,
            children: items,
        }
    }

    pub fn list_item(children: Vec<ContentNode>) -> Self {
        Self::ListItem { children }
    }

    /// Untyped container, as the editor's `root` node decodes
    pub fn container(children: Vec<ContentNode>) -> Self {
        Self::Generic {
            node_type: None,
            children,
        }
    }

    /// Child nodes; empty for leaves
    pub fn children(&self) -> &[ContentNode] {
        match self {
            Self::Paragraph { children }
            | Self::List { children, .. }
            | Self::ListItem { children }
            | Self::Heading { children, .. }
            | Self::Quote { children }
            | Self::Link { children, .. }
            | Self::Generic { children, .. } => children,
            Self::Text { .. } | Self::LineBreak => &[],
        }
    }

    /// Count words in this subtree
    pub fn word_count(&self) -> usize {
        match self {
            Self::Text { text, .. } => text.split_whitespace().count(),
            _ => self.children().iter().map(|c| c.word_count()).sum(),
        }
    }

    /// Count characters in this subtree
    pub fn char_count(&self) -> usize {
        match self {
            Self::Text { text, .. } => text.chars().count(),
            _ => self.children().iter().map(|c| c.char_count()).sum(),
        }
    }
}

/// The rich-text value of one description field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDocument", into = "RawDocument")]
pub enum Document {
    /// Node tree, rooted at a container
    Tree(ContentNode),
    /// Unstructured string; rendered verbatim
    Plain(String),
}

impl Default for Document {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl Document {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Tree document whose root container holds `blocks`
    pub fn from_blocks(blocks: Vec<ContentNode>) -> Self {
        Self::Tree(ContentNode::container(blocks))
    }

    /// Decode from the editor's JSON
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Encode to the editor's JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn root(&self) -> Option<&ContentNode> {
        match self {
            Self::Tree(root) => Some(root),
            Self::Plain(_) => None,
        }
    }

    /// True when the document holds no literal text at all
    pub fn is_empty(&self) -> bool {
        self.char_count() == 0
    }

    /// Count words in the document
    pub fn word_count(&self) -> usize {
        match self {
            Self::Tree(root) => root.word_count(),
            Self::Plain(text) => text.split_whitespace().count(),
        }
    }

    /// Count characters in the document
    pub fn char_count(&self) -> usize {
        match self {
            Self::Tree(root) => root.char_count(),
            Self::Plain(text) => text.chars().count(),
        }
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<ContentNode> for Document {
    fn from(root: ContentNode) -> Self {
        Self::Tree(root)
    }
}

// Wire shapes. The editor stores every node as one loosely typed object, so
// decoding goes through a permissive struct and is then narrowed.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Numeric bits on text nodes, an alignment string on element nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    list_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RawNode>>,
}

impl RawNode {
    fn typed(node_type: &str) -> Self {
        Self {
            node_type: Some(node_type.to_string()),
            ..Self::default()
        }
    }

    fn with_children(mut self, children: Vec<ContentNode>) -> Self {
        self.children = Some(children.into_iter().map(RawNode::from).collect());
        self
    }

    fn link_target(&self) -> (String, bool) {
        let field = |key: &str| self.fields.as_ref().and_then(|f| f.get(key));
        let url = field("url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| self.url.clone())
            .unwrap_or_default();
        let new_tab = field("newTab").and_then(Value::as_bool).unwrap_or(false);
        (url, new_tab)
    }
}

fn heading_level(tag: Option<&str>) -> u8 {
    tag.and_then(|t| t.strip_prefix('h'))
        .and_then(|n| n.parse::<u8>().ok())
        .unwrap_or(1)
        .clamp(1, 6)
}

impl From<RawNode> for ContentNode {
    fn from(raw: RawNode) -> Self {
        let node_type = raw.node_type.clone();
        let children = |raw: RawNode| -> Vec<ContentNode> {
            raw.children
                .unwrap_or_default()
                .into_iter()
                .map(ContentNode::from)
                .collect()
        };

        match node_type.as_deref() {
            Some("text") => ContentNode::Text {
                format: raw
                    .format
                    .as_ref()
                    .and_then(Value::as_u64)
                    .map(|bits| TextFormat::from_bits(bits as u32))
                    .unwrap_or_default(),
                text: raw.text.unwrap_or_default(),
            },
            Some("paragraph") => ContentNode::Paragraph {
                children: children(raw),
            },
            Some("list") => ContentNode::List {
                kind: ListKind::from_editor(raw.list_type.as_deref(), raw.tag.as_deref()),
                children: children(raw),
            },
            Some("listitem") => ContentNode::ListItem {
                children: children(raw),
            },
            Some("heading") => ContentNode::Heading {
                level: heading_level(raw.tag.as_deref()),
                children: children(raw),
            },
            Some("quote") => ContentNode::Quote {
                children: children(raw),
            },
            Some("link") | Some("autolink") => {
                let (url, new_tab) = raw.link_target();
                ContentNode::Link {
                    url,
                    new_tab,
                    children: children(raw),
                }
            }
            Some("linebreak") => ContentNode::LineBreak,
            _ => ContentNode::Generic {
                node_type,
                children: children(raw),
            },
        }
    }
}

/// Editor node types decoded into dedicated variants
const KNOWN_TYPES: [&str; 9] = [
    "text",
    "paragraph",
    "list",
    "listitem",
    "heading",
    "quote",
    "link",
    "autolink",
    "linebreak",
];

impl From<ContentNode> for RawNode {
    fn from(node: ContentNode) -> Self {
        match node {
            ContentNode::Text { text, format } => RawNode {
                text: Some(text),
                format: Some(Value::from(format.bits())),
                ..RawNode::typed("text")
            },
            ContentNode::Paragraph { children } => RawNode::typed("paragraph").with_children(children),
            ContentNode::List { kind, children } => RawNode {
                list_type: Some(kind.editor_name().to_string()),
                tag: Some(kind.tag().to_string()),
                ..RawNode::typed("list")
            }
            .with_children(children),
            ContentNode::ListItem { children } => RawNode::typed("listitem").with_children(children),
            ContentNode::Heading { level, children } => RawNode {
                tag: Some(format!("h{}", level)),
                ..RawNode::typed("heading")
            }
            .with_children(children),
            ContentNode::Quote { children } => RawNode::typed("quote").with_children(children),
            ContentNode::Link {
                url,
                new_tab,
                children,
            } => RawNode {
                fields: Some(serde_json::json!({ "url": url, "newTab": new_tab })),
                ..RawNode::typed("link")
            }
            .with_children(children),
            ContentNode::LineBreak => RawNode::typed("linebreak"),
            ContentNode::Generic {
                node_type,
                children,
            } => RawNode {
                // A known name would decode as a different node
                node_type: node_type.filter(|name| !KNOWN_TYPES.contains(&name.as_str())),
                ..RawNode::default()
            }
            .with_children(children),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Null,
    Plain(String),
    Rooted { root: ContentNode },
    Bare(ContentNode),
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        match raw {
            RawDocument::Null => Document::default(),
            RawDocument::Plain(text) => Document::Plain(text),
            RawDocument::Rooted { root } | RawDocument::Bare(root) => Document::Tree(root),
        }
    }
}

impl From<Document> for RawDocument {
    fn from(doc: Document) -> Self {
        match doc {
            Document::Plain(text) => RawDocument::Plain(text),
            Document::Tree(root) => RawDocument::Rooted { root },
        }
    }
}
