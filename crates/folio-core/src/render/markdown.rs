// SPDX-License-Identifier: AGPL-3.0-or-later
//! Markdown renderer

use super::html::is_safe_url;
use crate::ast::{ContentNode, Document, ListKind, TextFormat};
use crate::traits::{OutputFormat, RenderConfig, Renderer, Result};

/// Markdown renderer (GFM flavoured)
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MarkdownRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<String> {
        let mut output = String::new();
        match doc {
            Document::Plain(text) => output.push_str(text),
            Document::Tree(root) => render_node(&mut output, root, config, 0),
        }
        Ok(output)
    }
}

fn is_block(node: &ContentNode) -> bool {
    match node {
        ContentNode::Paragraph { .. }
        | ContentNode::List { .. }
        | ContentNode::ListItem { .. }
        | ContentNode::Heading { .. }
        | ContentNode::Quote { .. } => true,
        ContentNode::Generic { children, .. } => children.iter().any(is_block),
        _ => false,
    }
}

fn render_node(output: &mut String, node: &ContentNode, config: &RenderConfig, depth: usize) {
    match node {
        ContentNode::Text { text, format } => render_text(output, text, *format),

        ContentNode::Paragraph { children } | ContentNode::ListItem { children } => {
            render_inlines(output, children, config, depth);
        }

        ContentNode::Heading { level, children } => {
            output.push_str(&"#".repeat(*level as usize));
            output.push(' ');
            render_inlines(output, children, config, depth);
        }

        ContentNode::Quote { children } => {
            let mut inner = String::new();
            render_inlines(&mut inner, children, config, depth);
            for (i, line) in inner.split('\n').enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                output.push_str("> ");
                output.push_str(line);
            }
        }

        ContentNode::List { kind, children } => render_list(output, *kind, children, config, depth),

        ContentNode::Link { url, children, .. } if !is_safe_url(url) => {
            render_inlines(output, children, config, depth);
        }

        ContentNode::Link { url, children, .. } => {
            output.push('[');
            render_inlines(output, children, config, depth);
            output.push_str("](");
            output.push_str(url);
            output.push(')');
        }

        ContentNode::LineBreak => output.push_str("  \n"),

        ContentNode::Generic { children, .. } => {
            if children.iter().any(is_block) {
                render_blocks(output, children, config, depth);
            } else {
                render_inlines(output, children, config, depth);
            }
        }
    }
}

/// Blocks separated by a blank line; empty blocks are dropped
fn render_blocks(output: &mut String, nodes: &[ContentNode], config: &RenderConfig, depth: usize) {
    let mut first = true;
    for node in nodes {
        let mut block = String::new();
        render_node(&mut block, node, config, depth);
        if block.is_empty() {
            continue;
        }
        if !first {
            output.push_str("\n\n");
        }
        output.push_str(&block);
        first = false;
    }
}

fn render_inlines(output: &mut String, nodes: &[ContentNode], config: &RenderConfig, depth: usize) {
    for node in nodes {
        render_node(output, node, config, depth);
    }
}

fn render_list(
    output: &mut String,
    kind: ListKind,
    items: &[ContentNode],
    config: &RenderConfig,
    depth: usize,
) {
    let prefix = config.indent.repeat(depth);

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&prefix);
        match kind {
            ListKind::Ordered => output.push_str(&format!("{}. ", i + 1)),
            ListKind::Unordered | ListKind::Check => output.push_str("- "),
        }

        let children = match item {
            ContentNode::ListItem { children } => children.as_slice(),
            other => std::slice::from_ref(other),
        };
        for child in children {
            match child {
                ContentNode::List { kind, children } => {
                    output.push('\n');
                    render_list(output, *kind, children, config, depth + 1);
                }
                other => render_node(output, other, config, depth),
            }
        }
    }
}

fn render_text(output: &mut String, text: &str, format: TextFormat) {
    if text.is_empty() {
        return;
    }

    let mut run = text.to_string();
    if format.is_code() {
        run = format!("`{}`", run);
    }
    if format.is_strikethrough() {
        run = format!("~~{}~~", run);
    }
    if format.is_underline() {
        run = format!("<u>{}</u>", run);
    }
    if format.is_bold() {
        run = format!("**{}**", run);
    }
    if format.is_italic() {
        run = format!("*{}*", run);
    }
    output.push_str(&run);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn markdown(doc: &Document) -> String {
        MarkdownRenderer::new()
            .render(doc, &RenderConfig::default())
            .unwrap()
    }

    #[test]
    fn test_script_link_renders_label_only() {
        let doc = Document::from_blocks(vec![ContentNode::paragraph(vec![ContentNode::Link {
            url: "javascript:alert(1)".to_string(),
            new_tab: false,
            children: vec![ContentNode::text("site")],
        }])]);
        assert_eq!(markdown(&doc), "site");
    }

    #[test]
    fn test_paragraphs() {
        let doc = Document::from_blocks(vec![
            ContentNode::Heading {
                level: 2,
                children: vec![ContentNode::text("Role")],
            },
            ContentNode::paragraph(vec![
                ContentNode::text("Built "),
                ContentNode::formatted("things", TextFormat::BOLD | TextFormat::ITALIC),
            ]),
            ContentNode::paragraph(Vec::new()),
            ContentNode::Quote {
                children: vec![
                    ContentNode::text("one"),
                    ContentNode::LineBreak,
                    ContentNode::text("two"),
                ],
            },
        ]);

        assert_eq!(
            markdown(&doc),
            "## Role\n\nBuilt ***things***\n\n> one  \n> two"
        );
    }

    #[test]
    fn test_nested_lists() {
        let doc = Document::from_blocks(vec![ContentNode::list(
            ListKind::Ordered,
            vec![
                ContentNode::list_item(vec![
                    ContentNode::text("first"),
                    ContentNode::list(
                        ListKind::Unordered,
                        vec![ContentNode::list_item(vec![ContentNode::text("inner")])],
                    ),
                ]),
                ContentNode::list_item(vec![ContentNode::Link {
                    url: "https://example.com".to_string(),
                    new_tab: false,
                    children: vec![ContentNode::formatted("site", TextFormat::CODE)],
                }]),
            ],
        )]);

        assert_eq!(
            markdown(&doc),
            "1. first\n  - inner\n2. [`site`](https://example.com)"
        );
    }

    #[test]
    fn test_plain_document() {
        assert_eq!(markdown(&Document::plain("as is")), "as is");
    }
}
