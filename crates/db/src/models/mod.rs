//! Database row structs.
//!
//! Rows are decoded with `FromRow` and converted into the wire types
//! defined in `planner_core`.

pub mod event;
