pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /events                          list, create
/// /events/{id}                     get, update, delete
/// /events/date/{date}              events on a date (time ascending)
/// /events/category/{category}      events in a category
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/events", events::router())
}
