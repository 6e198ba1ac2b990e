//! Row model for the `events` table.

use planner_core::event::Event;
use planner_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: String,
    pub time: Option<String>,
    pub category: Option<String>,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<EventRow> for Event {
    fn from(r: EventRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            location: r.location,
            date: r.date,
            time: r.time,
            category: r.category,
            color: r.color,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
