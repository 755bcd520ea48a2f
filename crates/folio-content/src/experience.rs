// SPDX-License-Identifier: AGPL-3.0-or-later
//! Experience collection records and the list endpoint response

use chrono::NaiveDate;
use folio_core::duration::{self, DurationError};
use folio_core::{Document, Markup};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One entry of the work history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub description: Document,
    #[serde(with = "date_format")]
    pub start_date: NaiveDate,
    /// Only read when `is_present` is false
    #[serde(default, with = "date_format::option")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_present: bool,
}

impl ExperienceRecord {
    /// `"Jan 2022 - Present"` style label
    pub fn period(&self) -> Result<String, DurationError> {
        duration::period(self.start_date, self.end_date, self.is_present)
    }

    /// Elapsed time label measured against `today`
    pub fn duration_at(&self, today: NaiveDate) -> Result<String, DurationError> {
        duration::duration_at(self.start_date, self.end_date, self.is_present, today)
    }

    /// Description as presentation markup
    pub fn description_markup(&self) -> Markup {
        folio_core::render(&self.description)
    }

    /// Description flattened to text
    pub fn description_text(&self) -> String {
        folio_core::extract_text(&self.description)
    }
}

/// Paginated response of the experience list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePage {
    pub docs: Vec<ExperienceRecord>,
    #[serde(default)]
    pub total_docs: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
}

impl ExperiencePage {
    /// Single page holding every record
    pub fn from_records(docs: Vec<ExperienceRecord>) -> Self {
        let total = docs.len();
        Self {
            docs,
            total_docs: total,
            limit: total,
            page: Some(1),
            total_pages: 1,
            has_next_page: false,
            has_prev_page: false,
        }
    }

    /// Decode a list response or a bare array of records
    ///
    /// The shape is chosen up front so field errors such as a bad date reach
    /// the caller intact.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        match serde_json::from_str(input)? {
            records @ Value::Array(_) => {
                Vec::<ExperienceRecord>::deserialize(records).map(Self::from_records)
            }
            page => Self::deserialize(page),
        }
    }
}

/// Newest first by start date, keeping the input order for ties
pub fn sort_newest_first(records: &mut [ExperienceRecord]) {
    records.sort_by(|a, b| b.start_date.cmp(&a.start_date));
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("invalid id: {}", other))),
    }
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Dates arrive as RFC 3339 timestamps from the store; plain `YYYY-MM-DD`
/// and `YYYY-MM` are accepted for hand-written exports. A timestamp keeps the
/// calendar date of its own offset.
pub(crate) mod date_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(input: &str) -> Option<NaiveDate> {
        let input = input.trim();
        DateTime::parse_from_rfc3339(input)
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(input, "%Y-%m-%d").ok())
            .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d").ok())
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw))),
                None => Ok(None),
            }
        }
    }
}
