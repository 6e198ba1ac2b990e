//! Domain types shared by the event planner server and client.

pub mod error;
pub mod event;
pub mod types;
