use crate::error::{ErrorType, IntoResult};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The `chrono` format string for `dd.MM.yyyy`, used both on disk and at the prompt.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// One logged wellness event.
///
/// An `Activity` is never modified after it is constructed. Updating an entry in the store
/// replaces the whole value.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    activity_type: String,
    /// Minutes. Negative values are accepted and kept as-is.
    duration: i64,
    date: NaiveDate,
    notes: String,
}

impl Activity {
    pub fn new(
        activity_type: impl Into<String>,
        duration: i64,
        date: NaiveDate,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            activity_type: activity_type.into(),
            duration,
            date,
            notes: notes.into(),
        }
    }

    /// Builds an `Activity` from unparsed text, as typed at the prompt or read from the data file.
    ///
    /// # Errors
    /// - `ErrorType::Parse` if `duration` is not an integer or `date` is not `dd.MM.yyyy`.
    pub fn parse(
        activity_type: impl Into<String>,
        duration: &str,
        date: &str,
        notes: impl Into<String>,
    ) -> Result<Self> {
        let duration = parse_duration(duration)?;
        let date = parse_date(date)?;
        Ok(Self::new(activity_type, duration, date, notes))
    }

    pub fn activity_type(&self) -> &str {
        &self.activity_type
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// The date rendered as `dd.MM.yyyy`.
    pub fn formatted_date(&self) -> String {
        format_date(self.date)
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | Duration: {} mins | Date: {} | Notes: {}",
            self.activity_type,
            self.duration,
            self.formatted_date(),
            self.notes
        )
    }
}

/// Parses a duration in minutes.
pub fn parse_duration(s: &str) -> Result<i64> {
    s.parse::<i64>()
        .with_context(|| format!("Invalid duration '{s}', expected a whole number of minutes"))
        .pub_result(ErrorType::Parse)
}

/// Parses a `dd.MM.yyyy` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("Invalid date '{s}', expected dd.MM.yyyy"))
        .pub_result(ErrorType::Parse)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
