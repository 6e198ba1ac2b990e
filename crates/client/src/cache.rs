//! Observable in-memory mirror of the server's event list.
//!
//! [`EventCache`] is constructed explicitly and shared by whoever needs it
//! (typically behind an `Arc`). Reads are synchronous snapshots; mutations
//! go to the server first and are applied locally only when the server
//! accepted them. Every replacement of the list is published to all
//! [`Subscription`]s, in order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use planner_core::event::{Event, EventInput};
use planner_core::types::DbId;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use crate::api::EventApi;
use crate::error::ClientError;
use crate::filter::validate_form;

/// An immutable view of the cached event list.
pub type Snapshot = Arc<[Event]>;

/// Default buffer capacity for the snapshot channel.
const DEFAULT_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// EventCache
// ---------------------------------------------------------------------------

/// Client-side event store kept in sync with the server.
pub struct EventCache {
    api: Arc<dyn EventApi>,
    current: Mutex<Snapshot>,
    sender: broadcast::Sender<Snapshot>,
}

impl EventCache {
    /// Create an empty cache on top of the given transport.
    pub fn new(api: Arc<dyn EventApi>) -> Self {
        Self::with_capacity(api, DEFAULT_CAPACITY)
    }

    /// Create an empty cache whose subscribers may fall at most
    /// `capacity` snapshots behind before they observe
    /// [`ClientError::Lagged`]. A capacity of zero is treated as one.
    pub fn with_capacity(api: Arc<dyn EventApi>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            api,
            current: Mutex::new(Arc::from(Vec::new())),
            sender,
        }
    }

    /// Create a cache and populate it with an initial [`reload`](Self::reload).
    ///
    /// A failed initial load is logged and leaves the cache empty.
    pub async fn load(api: Arc<dyn EventApi>) -> Self {
        let cache = Self::new(api);
        // Failure is already logged by `reload`.
        let _ = cache.reload().await;
        cache
    }

    // -- Subscription -------------------------------------------------------

    /// Subscribe to snapshot replacements.
    ///
    /// The first value received is the snapshot current at subscription
    /// time; every later replacement follows in order.
    pub fn subscribe(&self) -> Subscription {
        // Taken under the lock so no replacement slips between the
        // initial snapshot and the receiver.
        let current = self.lock();
        Subscription {
            initial: Some(Arc::clone(&current)),
            receiver: self.sender.subscribe(),
        }
    }

    // -- Synchronous reads --------------------------------------------------

    /// The current snapshot.
    pub fn get_all(&self) -> Snapshot {
        Arc::clone(&self.lock())
    }

    /// Cached events on an exact date, in cache order.
    pub fn get_by_date(&self, date: &str) -> Vec<Event> {
        self.get_all()
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect()
    }

    /// Cached events with an exact category, in cache order.
    pub fn get_by_category(&self, category: &str) -> Vec<Event> {
        self.get_all()
            .iter()
            .filter(|e| e.category.as_deref() == Some(category))
            .cloned()
            .collect()
    }

    // -- Server round-trips -------------------------------------------------

    /// Replace the cache with the server's full list.
    ///
    /// On failure the cache keeps its previous contents.
    pub async fn reload(&self) -> Result<(), ClientError> {
        match self.api.list().await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "Event cache reloaded");
                self.replace(|_| events);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reload events");
                Err(e)
            }
        }
    }

    /// Fetch one event from the server. The cache is neither read nor
    /// modified.
    pub async fn get_by_id(&self, id: DbId) -> Result<Event, ClientError> {
        self.api.get(id).await.inspect_err(|e| {
            tracing::warn!(error = %e, event_id = id, "Failed to load event");
        })
    }

    /// Create an event and append the server's record to the cache.
    pub async fn create(&self, input: &EventInput) -> Result<Event, ClientError> {
        validate_form(input)?;

        let event = self.api.create(input).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to create event");
        })?;

        let stored = event.clone();
        self.replace(move |events| {
            let mut next: Vec<Event> = events
                .iter()
                .filter(|e| e.id != stored.id)
                .cloned()
                .collect();
            next.push(stored);
            next
        });
        Ok(event)
    }

    /// Update an event and replace the cached entry with the same id.
    pub async fn update(&self, id: DbId, input: &EventInput) -> Result<Event, ClientError> {
        validate_form(input)?;

        let event = self.api.update(id, input).await.inspect_err(|e| {
            tracing::warn!(error = %e, event_id = id, "Failed to update event");
        })?;

        let stored = event.clone();
        self.replace(move |events| {
            events
                .iter()
                .map(|e| if e.id == id { stored.clone() } else { e.clone() })
                .collect()
        });
        Ok(event)
    }

    /// Delete an event and remove it from the cache.
    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.api.delete(id).await.inspect_err(|e| {
            tracing::warn!(error = %e, event_id = id, "Failed to delete event");
        })?;

        self.replace(|events| events.iter().filter(|e| e.id != id).cloned().collect());
        Ok(())
    }

    // -- Internals ----------------------------------------------------------

    /// Compute the next list from the current one, store it, and publish it.
    ///
    /// Store and publish happen under the same lock so subscribers see
    /// replacements in the order they were applied.
    fn replace(&self, next: impl FnOnce(&[Event]) -> Vec<Event>) {
        let mut current = self.lock();
        let snapshot: Snapshot = Arc::from(next(&current));
        *current = Arc::clone(&snapshot);
        // Ignore the SendError: it only means there are no subscribers.
        let _ = self.sender.send(snapshot);
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        // The guarded value is always a complete snapshot, so a poisoned
        // lock still holds consistent data.
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A stream of snapshots from an [`EventCache`].
pub struct Subscription {
    initial: Option<Snapshot>,
    receiver: broadcast::Receiver<Snapshot>,
}

impl Subscription {
    /// Wait for the next snapshot.
    ///
    /// Returns [`ClientError::Lagged`] if this subscriber fell behind; the
    /// following calls continue with the oldest snapshot still buffered.
    /// Returns [`ClientError::Closed`] once the cache is dropped.
    pub async fn recv(&mut self) -> Result<Snapshot, ClientError> {
        if let Some(initial) = self.initial.take() {
            return Ok(initial);
        }
        self.receiver.recv().await.map_err(|e| match e {
            RecvError::Lagged(n) => ClientError::Lagged(n),
            RecvError::Closed => ClientError::Closed,
        })
    }

    /// Return the next snapshot if one is ready, without waiting.
    pub fn try_recv(&mut self) -> Result<Option<Snapshot>, ClientError> {
        if let Some(initial) = self.initial.take() {
            return Ok(Some(initial));
        }
        match self.receiver.try_recv() {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Lagged(n)) => Err(ClientError::Lagged(n)),
            Err(TryRecvError::Closed) => Err(ClientError::Closed),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
