// SPDX-License-Identifier: AGPL-3.0-or-later
//! Rich-text renderer: content tree to markup

use super::markup::{Markup, Tag};
use crate::ast::{ContentNode, Document, ListKind, TextFormat};
use crate::traits::{OutputFormat, RenderConfig, Renderer, Result};

/// Wrappers applied to a text run, innermost first
const TEXT_WRAPPERS: [(TextFormat, Tag); 5] = [
    (TextFormat::CODE, Tag::Code),
    (TextFormat::STRIKETHROUGH, Tag::S),
    (TextFormat::UNDERLINE, Tag::U),
    (TextFormat::BOLD, Tag::Strong),
    (TextFormat::ITALIC, Tag::Em),
];

/// Render a document to markup.
///
/// Total over every tree: unknown nodes contribute their children only and
/// childless unknown nodes render as `Markup::Empty`. A plain-string document
/// renders as a single text node.
pub fn render(doc: &Document) -> Markup {
    match doc {
        Document::Plain(text) => Markup::text(text.as_str()),
        Document::Tree(root) => render_node(root),
    }
}

fn render_node(node: &ContentNode) -> Markup {
    match node {
        ContentNode::Text { text, format } => render_text(text, *format),

        ContentNode::Paragraph { children } => Markup::element(Tag::P, render_children(children)),

        ContentNode::List { kind, children } => {
            let tag = match kind {
                ListKind::Ordered => Tag::Ol,
                ListKind::Unordered | ListKind::Check => Tag::Ul,
            };
            let items = children
                .iter()
                .map(|child| match child {
                    ContentNode::ListItem { .. } => render_node(child),
                    // Stray children still need a list entry to be valid
                    other => Markup::element(Tag::Li, vec![render_node(other)]),
                })
                .collect();
            Markup::element(tag, items)
        }

        ContentNode::ListItem { children } => Markup::element(Tag::Li, render_children(children)),

        ContentNode::Heading { level, children } => {
            Markup::element(Tag::Heading(*level), render_children(children))
        }

        ContentNode::Quote { children } => {
            Markup::element(Tag::Blockquote, render_children(children))
        }

        ContentNode::Link {
            url,
            new_tab,
            children,
        } => {
            if !is_safe_url(url) {
                return Markup::fragment(render_children(children));
            }
            let link = Markup::element(Tag::A, render_children(children)).with_attr("href", url.as_str());
            if *new_tab {
                link.with_attr("target", "_blank")
                    .with_attr("rel", "noopener noreferrer")
            } else {
                link
            }
        }

        ContentNode::LineBreak => Markup::element(Tag::Br, Vec::new()),

        ContentNode::Generic { children, .. } => {
            if children.is_empty() {
                Markup::Empty
            } else {
                Markup::fragment(render_children(children))
            }
        }
    }
}

/// Schemes a link may point at; scheme-less targets are relative.
const SAFE_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Whether `url` may be emitted as a link target.
///
/// Control characters and whitespace are dropped before the scheme is read,
/// as browsers do, so `java\tscript:` is still caught.
pub(crate) fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_control() && !c.is_whitespace())
        .collect();
    let scheme_end = cleaned.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(end) if cleaned[end..].starts_with(':') => {
            let scheme = cleaned[..end].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

fn render_children(children: &[ContentNode]) -> Vec<Markup> {
    children.iter().map(render_node).collect()
}

fn render_text(text: &str, format: TextFormat) -> Markup {
    if text.is_empty() {
        return Markup::Empty;
    }

    TEXT_WRAPPERS
        .iter()
        .filter(|(bit, _)| format.contains(*bit))
        .fold(Markup::text(text), |inner, (_, tag)| {
            Markup::element(*tag, vec![inner])
        })
}

/// HTML renderer
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(&self, doc: &Document, _config: &RenderConfig) -> Result<String> {
        Ok(render(doc).to_html())
    }
}
