// SPDX-License-Identifier: AGPL-3.0-or-later
//! Folio Core - Rich-text content tree and renderers
//!
//! This crate provides:
//! - The content node tree stored by the CMS rich-text editor
//! - A markup renderer plus HTML, Markdown and plain text output
//! - Plain text extraction and truncated previews
//! - Period and elapsed-time labels for date ranges

pub mod ast;
pub mod duration;
pub mod render;
pub mod traits;

pub use ast::{ContentNode, Document, ListKind, TextFormat};
pub use duration::{duration, duration_at, elapsed, period, DurationError, Elapsed};
pub use render::{extract_text, preview, render, Markup, Tag};
pub use traits::{
    OutputFormat, RenderConfig, RenderError, Renderer, RendererExt, RendererRegistry, Result,
};
