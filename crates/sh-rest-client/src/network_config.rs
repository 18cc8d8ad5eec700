// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Network configuration types

use serde::{Deserialize, Serialize};

/// Network configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Backend REST API base URL, e.g. `https://school.example/api/`
    #[serde(rename = "service-base-url")]
    pub service_base_url: Option<String>,

    /// Bearer token for the backend
    #[serde(rename = "auth-token")]
    pub auth_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,
}
