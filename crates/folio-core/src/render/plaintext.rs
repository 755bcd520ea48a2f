// SPDX-License-Identifier: AGPL-3.0-or-later
//! Plain text extraction and previews

use crate::ast::{ContentNode, Document};
use crate::traits::{OutputFormat, RenderConfig, Renderer, Result};
use unicode_segmentation::UnicodeSegmentation;

/// Concatenate every text run of a document, each followed by one space.
///
/// Lossy by design: formatting and block boundaries are dropped, so this is
/// not an inverse of [`super::render`]. Trailing whitespace is trimmed.
pub fn extract_text(doc: &Document) -> String {
    match doc {
        Document::Plain(text) => text.trim_end().to_string(),
        Document::Tree(root) => {
            let mut output = String::new();
            collect_text(&mut output, root);
            output.trim_end().to_string()
        }
    }
}

fn collect_text(output: &mut String, node: &ContentNode) {
    match node {
        ContentNode::Text { text, .. } => {
            output.push_str(text);
            output.push(' ');
        }
        other => {
            for child in other.children() {
                collect_text(output, child);
            }
        }
    }
}

/// Extracted text cut to at most `max_chars` grapheme clusters.
///
/// The cut backs off to the last whitespace when one exists and `ellipsis` is
/// appended whenever anything was dropped.
pub fn preview(doc: &Document, max_chars: usize, ellipsis: &str) -> String {
    truncate(&extract_text(doc), max_chars, ellipsis)
}

pub(crate) fn truncate(text: &str, max_chars: usize, ellipsis: &str) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_chars {
        return text.to_string();
    }

    let head = graphemes[..max_chars].concat();
    let at_word_end = graphemes[max_chars].chars().all(char::is_whitespace);
    let kept = match head.rfind(char::is_whitespace) {
        Some(idx) if !at_word_end && idx > 0 => &head[..idx],
        _ => head.as_str(),
    };

    format!("{}{}", kept.trim_end(), ellipsis)
}

/// Plain text renderer
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::PlainText
    }

    fn render(&self, doc: &Document, _config: &RenderConfig) -> Result<String> {
        Ok(extract_text(doc))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::ast::proptests::node_strategy;
    use proptest::prelude::*;

    fn payload_stats(node: &ContentNode) -> (usize, usize) {
        match node {
            ContentNode::Text { text, .. } => (text.len(), 1),
            other => other.children().iter().map(payload_stats).fold((0, 0), |a, b| {
                (a.0 + b.0, a.1 + b.1)
            }),
        }
    }

    proptest! {
        // Property: output never exceeds payloads plus one separator each
        #[test]
        fn prop_extract_length_bounded(root in node_strategy()) {
            let (payload, runs) = payload_stats(&root);
            let doc = Document::from_blocks(vec![root]);
            prop_assert!(extract_text(&doc).len() <= payload + runs);
        }

        // Property: plain documents extract to themselves, trimmed
        #[test]
        fn prop_plain_extracts_verbatim(text in "[a-zA-Z0-9 ]{0,40}") {
            prop_assert_eq!(extract_text(&Document::plain(text.clone())), text.trim_end());
        }

        // Property: previews never exceed the limit plus the ellipsis
        #[test]
        fn prop_preview_bounded(text in "[a-z ]{0,80}", max in 0usize..40) {
            let out = truncate(&text, max, "~");
            prop_assert!(out.graphemes(true).count() <= max + 1);
        }
    }
}
