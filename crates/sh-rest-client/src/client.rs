// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main REST API client implementation

use std::time::Duration;

use reqwest::{Client as HttpClient, Method, Response};
use serde_json::Value;
use sh_api_contract::ErrorBody;
use sh_client_api::{ApiMethod, ApiRequest};
use url::Url;

use crate::auth::AuthConfig;
use crate::error::{RestClientError, RestClientResult};
use crate::network_config::NetworkConfig;

const USER_AGENT: &str = concat!("schoolhub/", env!("CARGO_PKG_VERSION"));

/// REST API client for the schoolhub backend
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
    auth: AuthConfig,
}

impl RestClient {
    /// Create a new REST client
    pub fn new(base_url: Url, auth: AuthConfig) -> RestClientResult<Self> {
        Self::build(base_url, auth, None)
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str, auth: AuthConfig) -> RestClientResult<Self> {
        Self::new(Url::parse(base_url)?, auth)
    }

    /// Create a client from the network section of the configuration
    pub fn from_config(config: &NetworkConfig) -> RestClientResult<Self> {
        let base_url = config.service_base_url.as_deref().ok_or_else(|| {
            RestClientError::Config("service-base-url is not configured".to_string())
        })?;
        let auth = config.auth_token.clone().map(AuthConfig::bearer).unwrap_or_default();
        let timeout = config.request_timeout_secs.map(Duration::from_secs);
        Self::build(Url::parse(base_url)?, auth, timeout)
    }

    fn build(base_url: Url, auth: AuthConfig, timeout: Option<Duration>) -> RestClientResult<Self> {
        let mut builder = HttpClient::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: with_trailing_slash(base_url),
            auth,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the authentication config
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// Resolve a request path and query against the base URL
    pub fn resolve(&self, request: &ApiRequest) -> RestClientResult<Url> {
        let mut url = self.base_url.join(request.path.trim_start_matches('/'))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    /// Perform one exchange and return the decoded JSON body
    pub async fn send(&self, request: ApiRequest) -> RestClientResult<Value> {
        let url = self.resolve(&request)?;
        let method = match request.method {
            ApiMethod::Get => Method::GET,
            ApiMethod::Post => Method::POST,
            ApiMethod::Patch => Method::PATCH,
            ApiMethod::Delete => Method::DELETE,
        };

        tracing::debug!(method = %method, url = %url, "sending request");

        let mut builder = self.http_client.request(method, url).headers(self.auth.headers()?);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> RestClientResult<Value> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&text)
                .map_err(|e| RestClientError::UnexpectedResponse(format!("{e}: {text}")));
        }

        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.message,
            Err(_) if text.trim().is_empty() => {
                status.canonical_reason().unwrap_or("request failed").to_string()
            }
            Err(_) => text,
        };
        tracing::warn!(status = status.as_u16(), %message, "request rejected by server");
        Err(RestClientError::ServerError { status, message })
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
