// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client API seam between the schoolhub store and its HTTP transport
//!
//! The store never talks to the network directly. It builds an [`ApiRequest`]
//! and hands it to a [`ClientApi`] implementation: the reqwest-backed
//! `RestClient` in production, the in-memory mock backend in tests and
//! offline demos. Responses come back as raw JSON and are unwrapped from the
//! `{ data: ... }` envelope by the helpers in [`envelope`].

pub mod envelope;
pub mod error;
pub mod request;

pub use envelope::{decode_count, decode_data};
pub use error::{ClientApiError, ClientApiResult};
pub use request::{ApiMethod, ApiRequest, item_path, query_pairs};

use async_trait::async_trait;

/// Transport used by the store to reach the backend
///
/// Implementations perform exactly one HTTP exchange per call and return the
/// response body as JSON. Retries and timeouts belong to the implementation,
/// not to callers.
#[async_trait]
pub trait ClientApi: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> ClientApiResult<serde_json::Value>;
}
