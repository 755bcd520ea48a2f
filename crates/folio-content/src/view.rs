// SPDX-License-Identifier: AGPL-3.0-or-later
//! Card and detail views of experience records

use crate::experience::ExperienceRecord;
use crate::{ContentError, Result};
use chrono::NaiveDate;
use folio_core::{preview, DurationError, Markup, RenderConfig};
use serde::Serialize;

fn labels(record: &ExperienceRecord, today: NaiveDate) -> Result<(String, String)> {
    let wrap = |source: DurationError| ContentError::Duration {
        id: record.id.clone(),
        source,
    };
    let period = record.period().map_err(wrap)?;
    let duration = record.duration_at(today).map_err(wrap)?;
    Ok((period, duration))
}

/// Compact list entry with a truncated text preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceCard {
    pub id: String,
    pub role: String,
    pub company: String,
    pub period: String,
    pub duration: String,
    pub preview: String,
}

impl ExperienceCard {
    pub fn from_record(
        record: &ExperienceRecord,
        config: &RenderConfig,
        today: NaiveDate,
    ) -> Result<Self> {
        let (period, duration) = labels(record, today)?;
        Ok(Self {
            id: record.id.clone(),
            role: record.role.clone(),
            company: record.company.clone(),
            period,
            duration,
            preview: preview(&record.description, config.preview_length, &config.ellipsis),
        })
    }
}

/// Selected record with its fully rendered description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDetail {
    pub id: String,
    pub role: String,
    pub company: String,
    pub period: String,
    pub duration: String,
    pub description: Markup,
    pub description_html: String,
    pub description_text: String,
}

impl ExperienceDetail {
    pub fn from_record(record: &ExperienceRecord, today: NaiveDate) -> Result<Self> {
        let (period, duration) = labels(record, today)?;
        let description = record.description_markup();
        Ok(Self {
            id: record.id.clone(),
            role: record.role.clone(),
            company: record.company.clone(),
            period,
            duration,
            description_html: description.to_html(),
            description,
            description_text: record.description_text(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{ContentNode, Document, TextFormat};
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn current_role() -> ExperienceRecord {
        ExperienceRecord {
            id: "lead".to_string(),
            role: "Senior Frontend Engineer".to_string(),
            company: "Tech Company".to_string(),
            description: Document::from_blocks(vec![ContentNode::paragraph(vec![
                ContentNode::text("Led the development of customer-facing applications and"),
                ContentNode::formatted("mentored", TextFormat::ITALIC),
                ContentNode::text("junior developers."),
            ])]),
            start_date: date(2022, 1, 15),
            end_date: None,
            is_present: true,
        }
    }

    #[test]
    fn test_card() {
        let config = RenderConfig {
            preview_length: 40,
            ..RenderConfig::default()
        };
        let card = ExperienceCard::from_record(&current_role(), &config, date(2024, 3, 1)).unwrap();

        assert_eq!(
            card,
            ExperienceCard {
                id: "lead".to_string(),
                role: "Senior Frontend Engineer".to_string(),
                company: "Tech Company".to_string(),
                period: "Jan 2022 - Present".to_string(),
                duration: "2 yrs 2 mos".to_string(),
                preview: "Led the development of customer-facing\u{2026}".to_string(),
            }
        );
    }

    #[test]
    fn test_detail() {
        let detail = ExperienceDetail::from_record(&current_role(), date(2022, 1, 20)).unwrap();

        assert_eq!(detail.duration, "0 mos");
        assert_eq!(
            detail.description_html,
            "<p>Led the development of customer-facing applications and\
             <em>mentored</em>junior developers.</p>"
        );
        assert_eq!(
            detail.description_text,
            "Led the development of customer-facing applications and mentored junior developers."
        );
    }

    #[test]
    fn test_detail_serializes_camel_case() {
        let detail = ExperienceDetail::from_record(&current_role(), date(2024, 3, 1)).unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["period"], "Jan 2022 - Present");
        assert!(json["descriptionHtml"].as_str().unwrap().starts_with("<p>"));
        assert_eq!(json["description"]["kind"], "fragment");
    }

    #[test]
    fn test_invariant_violation() {
        let mut record = current_role();
        record.is_present = false;
        let err = ExperienceDetail::from_record(&record, date(2024, 1, 1)).unwrap_err();
        assert!(matches!(
            err,
            ContentError::Duration {
                source: DurationError::MissingEndDate,
                ..
            }
        ));
    }
}
