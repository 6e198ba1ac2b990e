//! View-model helpers for list and form screens.

use planner_core::error::CoreError;
use planner_core::event::{Event, EventInput, NewEvent};

/// Category and free-text filter applied to a cache snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Exact category match. `None` shows every category.
    pub category: Option<String>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Matching events sorted by date ascending. Events sharing a date keep
    /// their relative order.
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let category = self.category.as_deref().filter(|c| !c.is_empty());

        let mut matched: Vec<Event> = events
            .iter()
            .filter(|e| category.map_or(true, |c| e.category.as_deref() == Some(c)))
            .filter(|e| needle.as_deref().map_or(true, |n| matches_search(e, n)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.date.cmp(&b.date));
        matched
    }
}

fn matches_search(event: &Event, needle: &str) -> bool {
    event.title.to_lowercase().contains(needle)
        || event
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

/// Run the server's required-field check locally.
pub fn validate_form(input: &EventInput) -> Result<NewEvent, CoreError> {
    input.normalize()
}
