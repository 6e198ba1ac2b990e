//! Integration tests for `EventRepo` against a fresh SQLite database.

use planner_core::event::{EventInput, NewEvent, DEFAULT_COLOR};
use planner_db::repositories::EventRepo;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_event(title: &str, date: &str, time: Option<&str>) -> NewEvent {
    let mut input = EventInput::new(title, date);
    if let Some(time) = time {
        input = input.with_time(time);
    }
    input.normalize().unwrap()
}

fn categorized(title: &str, date: &str, time: &str, category: &str) -> NewEvent {
    EventInput::new(title, date)
        .with_time(time)
        .with_category(category)
        .normalize()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create / get
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_assigns_id_and_timestamps(pool: SqlitePool) {
    let event = EventRepo::create(&pool, &new_event("Standup", "2026-02-05", Some("09:00")))
        .await
        .unwrap();

    assert!(event.id > 0);
    assert_eq!(event.title, "Standup");
    assert_eq!(event.time.as_deref(), Some("09:00"));
    assert_eq!(event.color, DEFAULT_COLOR);
    assert_eq!(event.created_at, event.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_assigns_fresh_ids(pool: SqlitePool) {
    let a = EventRepo::create(&pool, &new_event("A", "2026-02-05", None))
        .await
        .unwrap();
    EventRepo::delete(&pool, a.id).await.unwrap();
    let b = EventRepo::create(&pool, &new_event("B", "2026-02-05", None))
        .await
        .unwrap();

    assert_ne!(a.id, b.id, "ids must not be reused after delete");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_title_or_date_never_reaches_the_table(pool: SqlitePool) {
    // A `NewEvent` can only come from a validated input.
    assert!(EventInput::new("", "2026-02-05").normalize().is_err());
    assert!(EventInput::new("Standup", "  ").normalize().is_err());

    // Writes that bypass the repository are rejected by the schema.
    for (title, date) in [("", "2026-02-05"), ("Standup", ""), ("   ", "2026-02-05")] {
        let result = sqlx::query(
            "INSERT INTO events (title, date, color, created_at, updated_at) \
             VALUES (?1, ?2, '#3498db', '2026-02-01T00:00:00Z', '2026-02-01T00:00:00Z')",
        )
        .bind(title)
        .bind(date)
        .execute(&pool)
        .await;
        assert!(result.is_err(), "stored title={title:?} date={date:?}");
    }

    assert!(EventRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_id_round_trips_all_fields(pool: SqlitePool) {
    let input = EventInput::new("Dinner", "2026-03-01")
        .with_description("Birthday")
        .with_location("Home")
        .with_time("19:30")
        .with_category("Familie")
        .with_color("#e74c3c")
        .normalize()
        .unwrap();
    let created = EventRepo::create(&pool, &input).await.unwrap();

    let found = EventRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("event should exist");
    assert_eq!(found, created);
    assert_eq!(found.description.as_deref(), Some("Birthday"));
    assert_eq!(found.location.as_deref(), Some("Home"));
    assert_eq!(found.category.as_deref(), Some("Familie"));
    assert_eq!(found.color, "#e74c3c");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_returns_none(pool: SqlitePool) {
    let found = EventRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Listing and filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_by_date_desc_then_time_asc(pool: SqlitePool) {
    EventRepo::create(&pool, &new_event("early", "2026-02-05", Some("08:00")))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("older", "2026-01-10", Some("12:00")))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("late", "2026-02-05", Some("17:00")))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("newest", "2026-03-01", Some("10:00")))
        .await
        .unwrap();

    let titles: Vec<String> = EventRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, ["newest", "early", "late", "older"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_date_is_subset_ordered_by_time(pool: SqlitePool) {
    EventRepo::create(&pool, &new_event("lunch", "2026-02-05", Some("12:00")))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("other day", "2026-02-06", Some("07:00")))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("standup", "2026-02-05", Some("09:00")))
        .await
        .unwrap();

    let on_date = EventRepo::list_by_date(&pool, "2026-02-05").await.unwrap();
    let titles: Vec<&str> = on_date.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["standup", "lunch"]);

    let all = EventRepo::list(&pool).await.unwrap();
    let expected = all.iter().filter(|e| e.date == "2026-02-05").count();
    assert_eq!(on_date.len(), expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_date_without_matches_is_empty(pool: SqlitePool) {
    EventRepo::create(&pool, &new_event("standup", "2026-02-05", None))
        .await
        .unwrap();

    let events = EventRepo::list_by_date(&pool, "2026-02-10").await.unwrap();
    assert!(events.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_category_uses_store_order(pool: SqlitePool) {
    EventRepo::create(&pool, &categorized("w1", "2026-02-05", "10:00", "Arbeit"))
        .await
        .unwrap();
    EventRepo::create(&pool, &categorized("f1", "2026-02-06", "10:00", "Familie"))
        .await
        .unwrap();
    EventRepo::create(&pool, &categorized("w2", "2026-02-06", "09:00", "Arbeit"))
        .await
        .unwrap();
    EventRepo::create(&pool, &categorized("w3", "2026-02-05", "08:00", "Arbeit"))
        .await
        .unwrap();

    let titles: Vec<String> = EventRepo::list_by_category(&pool, "Arbeit")
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, ["w2", "w3", "w1"]);

    let none = EventRepo::list_by_category(&pool, "NonExistent").await.unwrap();
    assert!(none.is_empty());
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_overwrites_fields_and_refreshes_updated_at(pool: SqlitePool) {
    let input = EventInput::new("Standup", "2026-02-05")
        .with_time("09:00")
        .with_category("Arbeit")
        .normalize()
        .unwrap();
    let created = EventRepo::create(&pool, &input).await.unwrap();

    let input = new_event("Standup v2", "2026-02-05", None);
    let updated = EventRepo::update(&pool, created.id, &input)
        .await
        .unwrap()
        .expect("event should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Standup v2");
    // Full overwrite: fields absent from the update are cleared.
    assert!(updated.time.is_none());
    assert!(updated.category.is_none());
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_moves_updated_at_past_a_future_stored_value(pool: SqlitePool) {
    let created = EventRepo::create(&pool, &new_event("Standup", "2026-02-05", None))
        .await
        .unwrap();

    // Simulate a clock that has since stepped backwards.
    let future = created.updated_at + chrono::TimeDelta::hours(1);
    sqlx::query("UPDATE events SET updated_at = ?1 WHERE id = ?2")
        .bind(future)
        .bind(created.id)
        .execute(&pool)
        .await
        .unwrap();

    let input = new_event("Standup v2", "2026-02-05", None);
    let updated = EventRepo::update(&pool, created.id, &input)
        .await
        .unwrap()
        .expect("event should exist");

    assert!(updated.updated_at > future);
    assert!(updated.updated_at >= updated.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none(pool: SqlitePool) {
    let result = EventRepo::update(&pool, 999_999, &new_event("x", "2026-02-05", None))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_tracks_creates_and_deletes(pool: SqlitePool) {
    assert_eq!(EventRepo::count(&pool).await.unwrap(), 0);

    let a = EventRepo::create(&pool, &new_event("A", "2026-02-05", None))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("B", "2026-02-06", None))
        .await
        .unwrap();
    assert_eq!(EventRepo::count(&pool).await.unwrap(), 2);

    EventRepo::delete(&pool, a.id).await.unwrap();
    assert_eq!(EventRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_twice(pool: SqlitePool) {
    let created = EventRepo::create(&pool, &new_event("Standup", "2026-02-05", None))
        .await
        .unwrap();

    assert!(EventRepo::delete(&pool, created.id).await.unwrap());
    assert!(!EventRepo::delete(&pool, created.id).await.unwrap());
    assert!(EventRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}
