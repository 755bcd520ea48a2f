// SPDX-License-Identifier: AGPL-3.0-or-later
//! Renderer trait and output format registry

use crate::ast::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;

/// Target format of a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    Markdown,
    PlainText,
}

impl OutputFormat {
    /// File extension for this format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
            Self::PlainText => "txt",
        }
    }

    /// Short display name
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Markdown => "MD",
            Self::PlainText => "TXT",
        }
    }

    pub const ALL: [Self; 3] = [Self::Html, Self::Markdown, Self::PlainText];
}

/// Error type for rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("No renderer registered for {0:?}")]
    UnsupportedFormat(OutputFormat),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Configuration for rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum grapheme count of a preview
    pub preview_length: usize,
    /// Marker appended to a truncated preview
    pub ellipsis: String,
    /// Indentation for nested markdown lists (default: 2 spaces)
    pub indent: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            preview_length: 150,
            ellipsis: "\u{2026}".to_string(),
            indent: "  ".to_string(),
        }
    }
}

/// Renderer trait: convert a document to a target format
pub trait Renderer: Send + Sync {
    /// The target format this renderer produces
    fn format(&self) -> OutputFormat;

    /// Render a Document to a string
    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<String>;
}

/// Extension trait for streaming operations (not dyn-compatible)
pub trait RendererExt: Renderer {
    /// Render to a writer
    fn render_writer<W: Write>(
        &self,
        doc: &Document,
        writer: &mut W,
        config: &RenderConfig,
    ) -> Result<()> {
        let output = self.render(doc, config)?;
        writer.write_all(output.as_bytes())?;
        Ok(())
    }
}

impl<T: Renderer> RendererExt for T {}

/// Registry of renderers keyed by output format
pub struct RendererRegistry {
    renderers: HashMap<OutputFormat, Box<dyn Renderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registry holding the HTML, Markdown and plain text renderers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(crate::render::HtmlRenderer::new()));
        registry.register(Box::new(crate::render::MarkdownRenderer::new()));
        registry.register(Box::new(crate::render::PlainTextRenderer::new()));
        registry
    }

    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.insert(renderer.format(), renderer);
    }

    pub fn get(&self, format: OutputFormat) -> Option<&dyn Renderer> {
        self.renderers.get(&format).map(|r| r.as_ref())
    }

    /// Render with the renderer registered for `format`
    pub fn render(
        &self,
        doc: &Document,
        format: OutputFormat,
        config: &RenderConfig,
    ) -> Result<String> {
        self.get(format)
            .ok_or(RenderError::UnsupportedFormat(format))?
            .render(doc, config)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}
