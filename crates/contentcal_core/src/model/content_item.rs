//! Content item domain model.
//!
//! # Responsibility
//! - Define the record attached to a calendar date (title, type, status).
//! - Provide the day projection used for date-keyed lookups.
//!
//! # Invariants
//! - `title` is non-blank for every accepted item.
//! - `id` is derived from the creation instant in epoch milliseconds.
//! - The day of an item is the date of its instant in the reader's `DayZone`,
//!   never the offset it was written with.

use crate::calendar::DayZone;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifier of a content item.
///
/// Two items created within the same millisecond share an id; this is
/// accepted for a single-user local store.
pub type ContentId = i64;

/// Projection of a date-like value onto its calendar day.
///
/// Naive values already name a day and ignore `zone`; instants are
/// converted into `zone` first.
pub trait CalendarDay {
    fn calendar_day(&self, zone: DayZone) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self, _zone: DayZone) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self, _zone: DayZone) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self, zone: DayZone) -> NaiveDate {
        zone.day_of(self)
    }
}

/// Kind of planned content.
///
/// Stored values are read back through `FromStr`, so `"Blog-Post"` loads
/// the same way it parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ContentType {
    Article,
    BlogPost,
    Video,
    Social,
    Newsletter,
    Podcast,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Article,
        ContentType::BlogPost,
        ContentType::Video,
        ContentType::Social,
        ContentType::Newsletter,
        ContentType::Podcast,
    ];

    /// Wire name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::BlogPost => "blog_post",
            Self::Video => "video",
            Self::Social => "social",
            Self::Newsletter => "newsletter",
            Self::Podcast => "podcast",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ContentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_choice(value);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ContentValidationError::UnknownType(value.trim().to_string()))
    }
}

impl TryFrom<String> for ContentType {
    type Error = ContentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Editorial workflow state of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ContentStatus {
    Idea,
    Draft,
    Scheduled,
    Published,
}

impl ContentStatus {
    pub const ALL: [ContentStatus; 4] = [
        ContentStatus::Idea,
        ContentStatus::Draft,
        ContentStatus::Scheduled,
        ContentStatus::Published,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
        }
    }
}

impl Display for ContentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = ContentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_choice(value);
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ContentValidationError::UnknownStatus(value.trim().to_string()))
    }
}

impl TryFrom<String> for ContentStatus {
    type Error = ContentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Required-field violations for content input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    EmptyTitle,
    UnknownType(String),
    UnknownStatus(String),
}

impl Display for ContentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "content title cannot be empty"),
            Self::UnknownType(value) => write!(
                f,
                "unknown content type `{value}`; expected one of {}",
                join_choices(ContentType::ALL.iter().map(|kind| kind.as_str()))
            ),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown content status `{value}`; expected one of {}",
                join_choices(ContentStatus::ALL.iter().map(|status| status.as_str()))
            ),
        }
    }
}

impl Error for ContentValidationError {}

/// A planned piece of content attached to one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    /// Serialized as an ISO-8601 string; days are matched in the reader's zone.
    pub date: DateTime<FixedOffset>,
    pub title: String,
    /// Serialized as `type` to match the stored layout.
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub status: ContentStatus,
}

impl ContentItem {
    pub fn new(
        id: ContentId,
        date: DateTime<FixedOffset>,
        title: impl Into<String>,
        kind: ContentType,
        status: ContentStatus,
    ) -> Self {
        Self {
            id,
            date,
            title: title.into(),
            kind,
            status,
        }
    }

    /// Creates an item whose id is taken from `created_at` in epoch milliseconds.
    pub fn created_at(
        created_at: DateTime<FixedOffset>,
        date: DateTime<FixedOffset>,
        title: impl Into<String>,
        kind: ContentType,
        status: ContentStatus,
    ) -> Self {
        Self::new(created_at.timestamp_millis(), date, title, kind, status)
    }

    /// Checks required-field presence.
    pub fn validate(&self) -> Result<(), ContentValidationError> {
        if self.title.trim().is_empty() {
            return Err(ContentValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Returns whether this item falls on the same calendar day as `day` in `zone`.
    pub fn is_on(&self, day: &impl CalendarDay, zone: DayZone) -> bool {
        self.calendar_day(zone) == day.calendar_day(zone)
    }
}

impl CalendarDay for ContentItem {
    fn calendar_day(&self, zone: DayZone) -> NaiveDate {
        zone.day_of(&self.date)
    }
}

fn normalize_choice(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

fn join_choices<'a>(choices: impl Iterator<Item = &'a str>) -> String {
    choices.collect::<Vec<_>>().join("|")
}
