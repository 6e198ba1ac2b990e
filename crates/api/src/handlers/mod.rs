//! Request handlers.
//!
//! Handlers delegate to the repositories in `planner_db` and map errors
//! via [`AppError`](crate::error::AppError).

pub mod events;
