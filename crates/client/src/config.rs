/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without the `/events` suffix.
    pub api_url: String,
}

impl ClientConfig {
    /// Default API location of a locally running server.
    pub const DEFAULT_API_URL: &'static str = "http://localhost:3000/api";

    /// Read `PLANNER_API_URL`, falling back to [`Self::DEFAULT_API_URL`].
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("PLANNER_API_URL").unwrap_or_else(|_| Self::DEFAULT_API_URL.into());
        Self { api_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.into(),
        }
    }
}
