//! Client side of the event planner.
//!
//! - [`EventCache`] keeps an observable, in-memory mirror of the server's
//!   event list and applies the result of every successful mutation.
//! - [`EventApi`] is the transport seam; [`HttpEventApi`] implements it
//!   over the REST API with [`reqwest`].
//! - [`filter`] holds the view-model helpers used by list and form screens.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;

pub use api::{EventApi, HttpEventApi};
pub use cache::{EventCache, Snapshot, Subscription};
pub use config::ClientConfig;
pub use error::ClientError;
pub use filter::{validate_form, EventFilter};
