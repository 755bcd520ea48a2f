// SPDX-License-Identifier: AGPL-3.0-or-later
//! TOML configuration for content loading and previews

use crate::Result;
use folio_core::RenderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from `folio.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Experience export to read when none is given on the command line
    pub source: Option<PathBuf>,
    /// Maximum preview length in grapheme clusters
    pub preview_length: usize,
    /// Marker appended to truncated previews
    pub ellipsis: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            source: None,
            preview_length: render.preview_length,
            ellipsis: render.ellipsis,
        }
    }
}

impl ContentConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    /// Renderer settings derived from this configuration
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            preview_length: self.preview_length,
            ellipsis: self.ellipsis.clone(),
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ContentConfig::from_toml_str("").unwrap();
        assert_eq!(config, ContentConfig::default());
        assert_eq!(config.preview_length, 150);
    }

    #[test]
    fn test_overrides() {
        let config = ContentConfig::from_toml_str(
            r#"
            source = "content/experience.json"
            preview_length = 80
            ellipsis = "..."
            "#,
        )
        .unwrap();

        assert_eq!(config.source, Some(PathBuf::from("content/experience.json")));
        let render = config.render_config();
        assert_eq!(render.preview_length, 80);
        assert_eq!(render.ellipsis, "...");
    }

    #[test]
    fn test_invalid_toml() {
        let err = ContentConfig::from_toml_str("preview_length = \"long\"").unwrap_err();
        assert!(matches!(err, ContentError::Config(_)));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "preview_length = 12\n").unwrap();

        assert_eq!(ContentConfig::load(&path).unwrap().preview_length, 12);
    }
}
