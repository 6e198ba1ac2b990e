//! Repository for the `events` table.

use chrono::{TimeDelta, Utc};
use planner_core::event::{Event, NewEvent};
use planner_core::types::{DbId, Timestamp};
use sqlx::SqlitePool;

use crate::models::event::EventRow;

/// Column list for `events` queries.
const EVENT_COLUMNS: &str = "\
    id, title, description, location, date, time, category, color, \
    created_at, updated_at";

/// Store-wide listing order.
const LIST_ORDER: &str = "ORDER BY date DESC, time ASC, id ASC";

/// Provides CRUD and filter queries for calendar events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event.
    ///
    /// `created_at` and `updated_at` are set to the same instant.
    pub async fn create(pool: &SqlitePool, input: &NewEvent) -> Result<Event, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO events \
                 (title, description, location, date, time, category, color, \
                  created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(input.title())
            .bind(input.description())
            .bind(input.location())
            .bind(input.date())
            .bind(input.time())
            .bind(input.category())
            .bind(input.color())
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
            .map(Event::from)
    }

    /// Find an event by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1");
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Event::from))
    }

    /// List all events, newest date first, then by time of day.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events {LIST_ORDER}");
        let rows = sqlx::query_as::<_, EventRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// Number of stored events.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(pool)
            .await
    }

    /// List events on an exact date, ordered by time of day.
    pub async fn list_by_date(pool: &SqlitePool, date: &str) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE date = ?1 ORDER BY time ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, EventRow>(&query)
            .bind(date)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// List events with an exact category, in store-wide order.
    pub async fn list_by_category(
        pool: &SqlitePool,
        category: &str,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query =
            format!("SELECT {EVENT_COLUMNS} FROM events WHERE category = ?1 {LIST_ORDER}");
        let rows = sqlx::query_as::<_, EventRow>(&query)
            .bind(category)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// Overwrite every mutable field of an event and refresh `updated_at`.
    ///
    /// The new `updated_at` is strictly later than the stored one even if
    /// the system clock has stepped backwards.
    ///
    /// Returns `None` if no event has the given ID.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &NewEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<Timestamp> =
            sqlx::query_scalar("SELECT updated_at FROM events WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(previous) = previous else {
            return Ok(None);
        };

        let now = next_updated_at(previous, Utc::now());
        let query = format!(
            "UPDATE events SET \
                 title = ?2, \
                 description = ?3, \
                 location = ?4, \
                 date = ?5, \
                 time = ?6, \
                 category = ?7, \
                 color = ?8, \
                 updated_at = ?9 \
             WHERE id = ?1 \
             RETURNING {EVENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .bind(input.title())
            .bind(input.description())
            .bind(input.location())
            .bind(input.date())
            .bind(input.time())
            .bind(input.category())
            .bind(input.color())
            .bind(now)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(row.map(Event::from))
    }

    /// Permanently delete an event.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `now`, or one microsecond past `previous` when the clock has not
/// advanced beyond it.
fn next_updated_at(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}
