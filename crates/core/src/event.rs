//! Calendar event record, request payload, and input normalization.
//!
//! The server persists [`NewEvent`] values produced by
//! [`EventInput::normalize`]; the client runs the same check before
//! issuing a request so both sides agree on what "required" means.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Color assigned to events that do not specify one.
pub const DEFAULT_COLOR: &str = "#3498db";

/// Categories offered by the client. The server stores any free text.
pub const SUGGESTED_CATEGORIES: &[&str] =
    &["Arbeit", "Persönlich", "Familie", "Freizeit", "Sonstiges"];

/// Colors offered by the client. The first entry is [`DEFAULT_COLOR`].
pub const COLOR_PALETTE: &[&str] = &[
    DEFAULT_COLOR,
    "#e74c3c",
    "#2ecc71",
    "#f39c12",
    "#9b59b6",
    "#1abc9c",
];

// ---------------------------------------------------------------------------
// Event record
// ---------------------------------------------------------------------------

/// A stored calendar event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock time, `HH:MM`.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// Body of `POST /api/events` and `PUT /api/events/{id}`.
///
/// Every field is optional on the wire so that a missing `title` or `date`
/// surfaces as a validation error rather than a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl EventInput {
    /// Create an input with only the two required fields set.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            date: Some(date.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Validate required fields and normalize the optional ones.
    ///
    /// - `title` and `date` must be present and not blank.
    /// - Empty optional strings become `None`.
    /// - A missing or empty `color` becomes [`DEFAULT_COLOR`].
    pub fn normalize(&self) -> Result<NewEvent, CoreError> {
        let title = required(&self.title);
        let date = required(&self.date);

        let (title, date) = match (title, date) {
            (Some(title), Some(date)) => (title, date),
            (None, Some(_)) => return Err(CoreError::Validation("title is required".into())),
            (Some(_), None) => return Err(CoreError::Validation("date is required".into())),
            (None, None) => {
                return Err(CoreError::Validation("title and date are required".into()))
            }
        };

        Ok(NewEvent {
            title,
            description: optional(&self.description),
            location: optional(&self.location),
            date,
            time: optional(&self.time),
            category: optional(&self.category),
            color: optional(&self.color).unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        })
    }
}

impl From<&Event> for EventInput {
    /// Full-record payload for editing an existing event.
    fn from(event: &Event) -> Self {
        Self {
            title: Some(event.title.clone()),
            description: event.description.clone(),
            location: event.location.clone(),
            date: Some(event.date.clone()),
            time: event.time.clone(),
            category: event.category.clone(),
            color: Some(event.color.clone()),
        }
    }
}

/// A validated event ready to be written by the store.
///
/// Only [`EventInput::normalize`] builds one, so a `NewEvent` always has a
/// non-blank title and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    title: String,
    description: Option<String>,
    location: Option<String>,
    date: String,
    time: Option<String>,
    category: Option<String>,
    color: String,
}

impl NewEvent {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn optional(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
