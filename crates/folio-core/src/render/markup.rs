// SPDX-License-Identifier: AGPL-3.0-or-later
//! Presentation-ready markup tree produced by the rich-text renderer

use serde::Serialize;
use std::fmt;

/// Element tags the renderer emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    P,
    Ul,
    Ol,
    Li,
    Strong,
    Em,
    S,
    U,
    Code,
    Heading(u8),
    Blockquote,
    A,
    Br,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Self::P => "p",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Li => "li",
            Self::Strong => "strong",
            Self::Em => "em",
            Self::S => "s",
            Self::U => "u",
            Self::Code => "code",
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
            Self::Blockquote => "blockquote",
            Self::A => "a",
            Self::Br => "br",
        }
    }

    /// Void elements have no closing tag
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Br)
    }
}

/// Rendered output of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Markup {
    /// Renders to nothing
    Empty,
    /// Literal text, escaped on output
    Text { content: String },
    /// Wrapping element
    Element {
        tag: Tag,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        attrs: Vec<(String, String)>,
        children: Vec<Markup>,
    },
    /// Sequence without a wrapper
    Fragment { children: Vec<Markup> },
}

impl Markup {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn element(tag: Tag, children: Vec<Markup>) -> Self {
        Self::Element {
            tag,
            attrs: Vec::new(),
            children,
        }
    }

    pub fn fragment(children: Vec<Markup>) -> Self {
        Self::Fragment { children }
    }

    /// Add an attribute; no-op on non-elements
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.push((name.to_string(), value.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Serialise as HTML
    pub fn to_html(&self) -> String {
        let mut output = String::new();
        self.write_html(&mut output);
        output
    }

    fn write_html(&self, output: &mut String) {
        match self {
            Self::Empty => {}
            Self::Text { content } => output.push_str(&escape(content)),
            Self::Element {
                tag,
                attrs,
                children,
            } => {
                output.push('<');
                output.push_str(tag.name());
                for (name, value) in attrs {
                    output.push(' ');
                    output.push_str(name);
                    output.push_str("=\"");
                    output.push_str(&escape(value));
                    output.push('"');
                }
                output.push('>');
                if tag.is_void() {
                    return;
                }
                for child in children {
                    child.write_html(output);
                }
                output.push_str("</");
                output.push_str(tag.name());
                output.push('>');
            }
            Self::Fragment { children } => {
                for child in children {
                    child.write_html(output);
                }
            }
        }
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
