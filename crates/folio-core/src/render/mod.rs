// SPDX-License-Identifier: AGPL-3.0-or-later
//! Renderers for rich-text documents

pub mod html;
pub mod markdown;
pub mod markup;
pub mod plaintext;

pub use html::{render, HtmlRenderer};
pub use markdown::MarkdownRenderer;
pub use markup::{Markup, Tag};
pub use plaintext::{extract_text, preview, PlainTextRenderer};
