// SPDX-License-Identifier: AGPL-3.0-or-later
//! Folio Content - Experience records from the CMS and their card views
//!
//! Provides:
//! - Decoding of the experience collection and its list endpoint response
//! - Pluggable list sources (JSON export file, in-memory)
//! - Card and detail views combining previews, rendered markup and durations

pub mod config;
pub mod experience;
pub mod source;
pub mod view;

use folio_core::{DurationError, RenderError};
use thiserror::Error;

pub use config::ContentConfig;
pub use experience::{sort_newest_first, ExperiencePage, ExperienceRecord};
pub use source::{ExperienceCatalog, ExperienceSource, JsonFileSource, StaticSource};
pub use view::{ExperienceCard, ExperienceDetail};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Experience not found: {0}")]
    NotFound(String),

    #[error("Experience {id}: {source}")]
    Duration {
        id: String,
        #[source]
        source: DurationError,
    },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, ContentError>;
