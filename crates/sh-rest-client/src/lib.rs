// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! REST API client for the schoolhub backend
//!
//! This crate provides the production [`ClientApi`] implementation: a thin
//! reqwest wrapper that resolves request paths against the configured
//! service base URL, attaches the bearer token, and maps HTTP outcomes onto
//! the client API error taxonomy.

pub mod auth;
pub mod client;
pub mod error;
pub mod network_config;

pub use auth::*;
pub use client::*;
pub use error::*;

use async_trait::async_trait;
use sh_client_api::{ApiRequest, ClientApi, ClientApiResult};

#[async_trait]
impl ClientApi for client::RestClient {
    async fn execute(&self, request: ApiRequest) -> ClientApiResult<serde_json::Value> {
        self.send(request).await.map_err(Into::into)
    }
}
