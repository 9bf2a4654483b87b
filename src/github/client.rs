use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::{AppError, Result};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Thin authenticated wrapper around GitHub's REST and GraphQL endpoints.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: Option<String>,
    api_url: String,
    graphql_url: String,
}

impl GitHubClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            token: config.github_token.clone(),
            api_url: config.api_url.clone(),
            graphql_url: config.graphql_url.clone(),
        })
    }

    /// The configured token, or a configuration error before any request is built.
    pub fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GitHub token not configured".to_string()))
    }

    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> Result<RequestBuilder> {
        let token = self.token()?;
        Ok(self
            .http
            .get(self.rest_url(path))
            .header(AUTHORIZATION, format!("Bearer {token}")))
    }

    pub(crate) fn graphql(&self) -> Result<RequestBuilder> {
        let token = self.token()?;
        Ok(self
            .http
            .post(&self.graphql_url)
            .header(AUTHORIZATION, format!("Bearer {token}")))
    }
}

/// Human-readable status text, matching what browsers expose as `statusText`.
pub fn status_text(response: &Response) -> String {
    let status = response.status();
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

/// Decode a successful response body, mapping decode failures to upstream errors.
pub async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Upstream(format!("Unexpected {what} response from GitHub: {e}")))
}
