//! REST client for the event planner HTTP API.
//!
//! [`EventApi`] is the seam the cache talks through; [`HttpEventApi`]
//! implements it with [`reqwest`].

use async_trait::async_trait;
use planner_core::event::{Event, EventInput};
use planner_core::types::DbId;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Operations the event cache needs from the server.
#[async_trait]
pub trait EventApi: Send + Sync {
    /// `GET /events`
    async fn list(&self) -> Result<Vec<Event>, ClientError>;

    /// `GET /events/{id}`
    async fn get(&self, id: DbId) -> Result<Event, ClientError>;

    /// `POST /events`
    async fn create(&self, input: &EventInput) -> Result<Event, ClientError>;

    /// `PUT /events/{id}`
    async fn update(&self, id: DbId, input: &EventInput) -> Result<Event, ClientError>;

    /// `DELETE /events/{id}`
    async fn delete(&self, id: DbId) -> Result<(), ClientError>;
}

/// HTTP client for a single event planner server.
#[derive(Debug)]
pub struct HttpEventApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpEventApi {
    /// Create a client for the API rooted at `api_url`,
    /// e.g. `http://localhost:3000/api`.
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(api_url).map_err(|e| ClientError::InvalidUrl(format!("{api_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{api_url}: not a base URL"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// `GET /events/date/{date}`: server-side filter, ordered by time.
    pub async fn list_by_date(&self, date: &str) -> Result<Vec<Event>, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["date", date]))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /events/category/{category}`: server-side filter.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Event>, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["category", category]))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// `{base}/events/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Infallible: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("events").extend(segments);
        }
        url
    }

    /// Map 404 to [`ClientError::NotFound`] and any other non-2xx
    /// status to [`ClientError::Api`].
    async fn ensure_success(
        response: reqwest::Response,
        id: Option<DbId>,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(ClientError::NotFound { id });
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response, None).await?;
        Ok(response.json::<T>().await?)
    }

    async fn parse_event(response: reqwest::Response, id: DbId) -> Result<Event, ClientError> {
        let response = Self::ensure_success(response, Some(id)).await?;
        Ok(response.json::<Event>().await?)
    }
}

#[async_trait]
impl EventApi for HttpEventApi {
    async fn list(&self) -> Result<Vec<Event>, ClientError> {
        let response = self.client.get(self.endpoint(&[])).send().await?;
        Self::parse_response(response).await
    }

    async fn get(&self, id: DbId) -> Result<Event, ClientError> {
        let segment = id.to_string();
        let response = self
            .client
            .get(self.endpoint(&[segment.as_str()]))
            .send()
            .await?;
        Self::parse_event(response, id).await
    }

    async fn create(&self, input: &EventInput) -> Result<Event, ClientError> {
        let response = self
            .client
            .post(self.endpoint(&[]))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update(&self, id: DbId, input: &EventInput) -> Result<Event, ClientError> {
        let segment = id.to_string();
        let response = self
            .client
            .put(self.endpoint(&[segment.as_str()]))
            .json(input)
            .send()
            .await?;
        Self::parse_event(response, id).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let segment = id.to_string();
        let response = self
            .client
            .delete(self.endpoint(&[segment.as_str()]))
            .send()
            .await?;
        Self::ensure_success(response, Some(id)).await?;
        Ok(())
    }
}
