// SPDX-License-Identifier: AGPL-3.0-or-later
//! Experience list sources and the catalog built on them

use crate::experience::{sort_newest_first, ExperiencePage, ExperienceRecord};
use crate::view::{ExperienceCard, ExperienceDetail};
use crate::{ContentError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use folio_core::RenderConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read-only access to the experience collection
#[async_trait]
pub trait ExperienceSource: Send + Sync {
    /// All records, in the order the store returns them
    async fn list(&self) -> Result<Vec<ExperienceRecord>>;
}

/// Reads a saved list endpoint response (or a bare array of records)
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ExperienceSource for JsonFileSource {
    async fn list(&self) -> Result<Vec<ExperienceRecord>> {
        let input = tokio::fs::read_to_string(&self.path).await?;
        let page = ExperiencePage::from_json(&input)?;
        debug!(
            path = %self.path.display(),
            docs = page.docs.len(),
            total = page.total_docs,
            "Loaded experience export"
        );
        Ok(page.docs)
    }
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<ExperienceRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<ExperienceRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl ExperienceSource for StaticSource {
    async fn list(&self) -> Result<Vec<ExperienceRecord>> {
        Ok(self.records.clone())
    }
}

/// Sorted view over a source with card and detail projections
pub struct ExperienceCatalog<S> {
    source: S,
    config: RenderConfig,
}

impl<S: ExperienceSource> ExperienceCatalog<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, RenderConfig::default())
    }

    pub fn with_config(source: S, config: RenderConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Records, newest start date first
    pub async fn records(&self) -> Result<Vec<ExperienceRecord>> {
        let mut records = self.source.list().await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Compact cards for the list view
    pub async fn cards(&self, today: NaiveDate) -> Result<Vec<ExperienceCard>> {
        let cards = self
            .records()
            .await?
            .iter()
            .map(|record| ExperienceCard::from_record(record, &self.config, today))
            .collect::<Result<Vec<_>>>()?;
        info!(count = cards.len(), "Built experience cards");
        Ok(cards)
    }

    /// Full view of one record
    pub async fn detail(&self, id: &str, today: NaiveDate) -> Result<ExperienceDetail> {
        Ok(self.record_detail(id, today).await?.1)
    }

    /// One record together with its full view
    pub async fn record_detail(
        &self,
        id: &str,
        today: NaiveDate,
    ) -> Result<(ExperienceRecord, ExperienceDetail)> {
        let record = self
            .records()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ContentError::NotFound(id.to_string()))?;
        let detail = ExperienceDetail::from_record(&record, today)?;
        Ok((record, detail))
    }
}
