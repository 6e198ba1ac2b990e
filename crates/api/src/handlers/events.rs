//! Handlers for the `/events` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use planner_core::error::CoreError;
use planner_core::event::{Event, EventInput};
use planner_core::types::DbId;
use planner_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Event", id })
}

/// GET /api/events
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(events))
}

/// GET /api/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

/// POST /api/events
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<EventInput>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let new_event = input.normalize()?;
    let event = EventRepo::create(&state.pool, &new_event).await?;

    tracing::info!(event_id = event.id, date = %event.date, "Event created");

    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/{id}
///
/// Full-record update: fields missing from the body are cleared.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<EventInput>,
) -> AppResult<Json<Event>> {
    let new_event = input.normalize()?;
    let event = EventRepo::update(&state.pool, id, &new_event)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(event_id = id, "Event updated");

    Ok(Json(event))
}

/// DELETE /api/events/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !EventRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(event_id = id, "Event deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/events/date/{date}
pub async fn list_by_date(
    State(state): State<AppState>,
    AppPath(date): AppPath<String>,
) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list_by_date(&state.pool, &date).await?;
    Ok(Json(events))
}

/// GET /api/events/category/{category}
pub async fn list_by_category(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list_by_category(&state.pool, &category).await?;
    Ok(Json(events))
}
