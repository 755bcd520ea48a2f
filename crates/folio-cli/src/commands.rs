// SPDX-License-Identifier: AGPL-3.0-or-later
//! Command implementations; each returns the text to print

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use folio_content::{ContentConfig, ExperienceCard, ExperienceCatalog, JsonFileSource};
use folio_core::{Document, OutputFormat, RendererRegistry};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output of `show`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFormat {
    Rendered(OutputFormat),
    Json,
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub config: ContentConfig,
    pub today: NaiveDate,
}

impl Context {
    /// Explicit path, else the configured one
    pub fn source_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        explicit
            .or_else(|| self.config.source.clone())
            .context("No experience export given and no `source` configured")
    }

    fn catalog(&self, path: &Path) -> ExperienceCatalog<JsonFileSource> {
        ExperienceCatalog::with_config(JsonFileSource::new(path), self.config.render_config())
    }
}

fn format_card(card: &ExperienceCard) -> String {
    let mut output = format!(
        "{} @ {}\n  {} ({})",
        card.role, card.company, card.period, card.duration
    );
    if !card.preview.is_empty() {
        output.push_str("\n  ");
        output.push_str(&card.preview);
    }
    output
}

/// Cards for every record, newest first
pub async fn list(ctx: &Context, path: &Path, json: bool) -> Result<String> {
    let cards = ctx
        .catalog(path)
        .cards(ctx.today)
        .await
        .with_context(|| format!("Failed to list experience from {}", path.display()))?;
    debug!(count = cards.len(), "Listing cards");

    if json {
        return Ok(serde_json::to_string_pretty(&cards)?);
    }
    Ok(cards
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// One record with its full description
pub async fn show(ctx: &Context, path: &Path, id: &str, format: DetailFormat) -> Result<String> {
    let (record, detail) = ctx
        .catalog(path)
        .record_detail(id, ctx.today)
        .await
        .with_context(|| format!("Failed to show {} from {}", id, path.display()))?;

    let body = match format {
        DetailFormat::Json => return Ok(serde_json::to_string_pretty(&detail)?),
        DetailFormat::Rendered(OutputFormat::Html) => detail.description_html,
        DetailFormat::Rendered(other) => RendererRegistry::with_defaults().render(
            &record.description,
            other,
            &ctx.config.render_config(),
        )?,
    };

    Ok(format!(
        "{} @ {}\n{} ({})\n\n{}",
        detail.role, detail.company, detail.period, detail.duration, body
    ))
}

/// Render a standalone rich-text document file
pub async fn render(ctx: &Context, path: &Path, format: OutputFormat) -> Result<String> {
    let input = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let doc = Document::from_json(&input)
        .with_context(|| format!("{} is not a rich-text document", path.display()))?;
    debug!(words = doc.word_count(), format = format.label(), "Rendering document");

    Ok(RendererRegistry::with_defaults().render(&doc, format, &ctx.config.render_config())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const EXPORT: &str = r#"{
        "docs": [
            {
                "id": "agency",
                "role": "Frontend Developer",
                "company": "Digital Agency",
                "description": {"root": {"type": "root", "children": [
                    {"type": "paragraph", "children": [
                        {"type": "text", "text": "Built", "format": 1},
                        {"type": "text", "text": "web apps", "format": 0}
                    ]},
                    {"type": "list", "listType": "bullet", "children": [
                        {"type": "listitem", "children": [{"type": "text", "text": "UI reviews"}]}
                    ]}
                ]}},
                "startDate": "2020-06-01T00:00:00.000Z",
                "endDate": "2022-08-01T00:00:00.000Z",
                "isPresent": false
            },
            {
                "id": "tech",
                "role": "Senior Frontend Engineer",
                "company": "Tech Company",
                "description": "Led customer-facing applications.",
                "startDate": "2022-01-15T00:00:00.000Z",
                "isPresent": true
            }
        ],
        "totalDocs": 2
    }"#;

    fn export_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        file
    }

    fn context() -> Context {
        Context {
            config: ContentConfig::default(),
            today: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_text() {
        let file = export_file();
        let output = list(&context(), file.path(), false).await.unwrap();

        assert_eq!(
            output,
            "Senior Frontend Engineer @ Tech Company\n  Jan 2022 - Present (2 yrs 2 mos)\n  \
             Led customer-facing applications.\n\n\
             Frontend Developer @ Digital Agency\n  Jun 2020 - Aug 2022 (2 yrs 2 mos)\n  \
             Built web apps UI reviews"
        );
    }

    #[tokio::test]
    async fn test_list_json() {
        let file = export_file();
        let output = list(&context(), file.path(), true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["id"], "tech");
        assert_eq!(value[1]["period"], "Jun 2020 - Aug 2022");
    }

    #[tokio::test]
    async fn test_show_formats() {
        let file = export_file();
        let ctx = context();

        let html = show(&ctx, file.path(), "agency", DetailFormat::Rendered(OutputFormat::Html))
            .await
            .unwrap();
        assert!(html.ends_with(
            "<p><strong>Built</strong>web apps</p><ul><li>UI reviews</li></ul>"
        ));

        let markdown = show(
            &ctx,
            file.path(),
            "agency",
            DetailFormat::Rendered(OutputFormat::Markdown),
        )
        .await
        .unwrap();
        assert!(markdown.ends_with("**Built**web apps\n\n- UI reviews"));

        let err = show(&ctx, file.path(), "missing", DetailFormat::Json)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<folio_content::ContentError>(),
            Some(folio_content::ContentError::NotFound(id)) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_render_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"root":{"type":"root","children":[{"type":"paragraph","children":[{"type":"text","text":"Hi","format":2}]}]}}"#)
            .unwrap();

        let output = render(&context(), file.path(), OutputFormat::Html).await.unwrap();
        assert_eq!(output, "<p><em>Hi</em></p>");
    }

    #[test]
    fn test_source_path_resolution() {
        let mut ctx = context();
        assert!(ctx.source_path(None).is_err());

        ctx.config.source = Some(PathBuf::from("configured.json"));
        assert_eq!(ctx.source_path(None).unwrap(), PathBuf::from("configured.json"));
        assert_eq!(
            ctx.source_path(Some(PathBuf::from("explicit.json"))).unwrap(),
            PathBuf::from("explicit.json")
        );
    }
}
