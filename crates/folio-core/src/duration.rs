// SPDX-License-Identifier: AGPL-3.0-or-later
//! Employment period labels and elapsed-time formatting
//!
//! Elapsed time counts calendar months only: the day of month is ignored, so
//! Jan 31 to Feb 1 is one month.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for period and duration computation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("End date is required when the role is not current")]
    MissingEndDate,

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

pub type Result<T> = std::result::Result<T, DurationError>;

/// Whole years and remaining months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Elapsed {
    pub years: u32,
    pub months: u32,
}

impl Elapsed {
    pub const fn from_months(total: u32) -> Self {
        Self {
            years: total / 12,
            months: total % 12,
        }
    }

    pub const fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

fn unit(count: u32, name: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{} {}{}", count, name, plural)
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.years, self.months) {
            (0, months) => f.write_str(&unit(months, "mo")),
            (years, 0) => f.write_str(&unit(years, "yr")),
            (years, months) => write!(f, "{} {}", unit(years, "yr"), unit(months, "mo")),
        }
    }
}

fn month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

fn resolve_end(end: Option<NaiveDate>, is_present: bool, today: NaiveDate) -> Result<NaiveDate> {
    if is_present {
        Ok(today)
    } else {
        end.ok_or(DurationError::MissingEndDate)
    }
}

/// `"Jan 2022 - Mar 2023"`, or `"Jan 2022 - Present"` for a current role.
/// The end date is not read when `is_present` is set.
pub fn period(start: NaiveDate, end: Option<NaiveDate>, is_present: bool) -> Result<String> {
    let end_label = if is_present {
        "Present".to_string()
    } else {
        month_year(end.ok_or(DurationError::MissingEndDate)?)
    };
    Ok(format!("{} - {}", month_year(start), end_label))
}

/// Months between `start` and the end date, or `today` for a current role
pub fn elapsed(
    start: NaiveDate,
    end: Option<NaiveDate>,
    is_present: bool,
    today: NaiveDate,
) -> Result<Elapsed> {
    let end = resolve_end(end, is_present, today)?;
    let months = (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    if months < 0 {
        return Err(DurationError::EndBeforeStart { start, end });
    }
    Ok(Elapsed::from_months(months as u32))
}

/// Elapsed time label measured against a fixed `today`
pub fn duration_at(
    start: NaiveDate,
    end: Option<NaiveDate>,
    is_present: bool,
    today: NaiveDate,
) -> Result<String> {
    Ok(elapsed(start, end, is_present, today)?.to_string())
}

/// Elapsed time label such as `"2 yrs 2 mos"`; current roles run to today
pub fn duration(start: NaiveDate, end: Option<NaiveDate>, is_present: bool) -> Result<String> {
    duration_at(start, end, is_present, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn past(start: NaiveDate, end: NaiveDate) -> String {
        duration_at(start, Some(end), false, date(2030, 1, 1)).unwrap()
    }

    #[test]
    fn test_whole_year() {
        assert_eq!(past(date(2022, 1, 1), date(2023, 1, 1)), "1 yr");
    }

    #[test]
    fn test_months_only() {
        assert_eq!(past(date(2022, 3, 1), date(2022, 9, 1)), "6 mos");
        assert_eq!(past(date(2022, 3, 1), date(2022, 4, 1)), "1 mo");
    }

    #[test]
    fn test_years_and_months() {
        assert_eq!(past(date(2020, 6, 1), date(2022, 8, 1)), "2 yrs 2 mos");
        assert_eq!(past(date(2020, 6, 1), date(2021, 7, 1)), "1 yr 1 mo");
    }

    #[test]
    fn test_day_of_month_ignored() {
        assert_eq!(past(date(2022, 1, 31), date(2022, 2, 1)), "1 mo");
    }

    #[test]
    fn test_same_month_is_zero_months() {
        assert_eq!(past(date(2022, 5, 1), date(2022, 5, 28)), "0 mos");
    }

    #[test]
    fn test_present_runs_to_today() {
        let label = duration_at(date(2022, 1, 15), None, true, date(2024, 4, 2)).unwrap();
        assert_eq!(label, "2 yrs 3 mos");

        // End date is not read for a current role
        let label =
            duration_at(date(2022, 1, 15), Some(date(2022, 2, 1)), true, date(2023, 1, 2)).unwrap();
        assert_eq!(label, "1 yr");
    }

    #[test]
    fn test_period() {
        assert_eq!(
            period(date(2022, 1, 15), None, true).unwrap(),
            "Jan 2022 - Present"
        );
        assert_eq!(
            period(date(2020, 6, 1), Some(date(2022, 8, 31)), false).unwrap(),
            "Jun 2020 - Aug 2022"
        );
    }

    #[test]
    fn test_missing_end_date() {
        assert_eq!(
            period(date(2022, 1, 1), None, false),
            Err(DurationError::MissingEndDate)
        );
        assert_eq!(
            duration(date(2022, 1, 1), None, false),
            Err(DurationError::MissingEndDate)
        );
    }

    #[test]
    fn test_end_before_start() {
        let err = duration_at(date(2023, 1, 1), Some(date(2022, 12, 1)), false, date(2030, 1, 1))
            .unwrap_err();
        assert!(matches!(err, DurationError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_elapsed_parts() {
        let elapsed = elapsed(date(2020, 6, 1), Some(date(2022, 8, 1)), false, date(2030, 1, 1))
            .unwrap();
        assert_eq!(elapsed, Elapsed { years: 2, months: 2 });
        assert_eq!(elapsed.total_months(), 26);
    }
}
