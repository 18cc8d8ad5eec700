// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for API contract validation and parsing

use thiserror::Error;

/// Errors that can occur during API contract validation and parsing
#[derive(Debug, Error)]
pub enum ApiContractError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported attachment type: {0}")]
    UnsupportedAttachmentType(String),

    #[error("Attachment is too large: {size} bytes (limit {limit} bytes)")]
    AttachmentTooLarge { size: u64, limit: u64 },

    #[error("Invalid time range: {start} - {end}")]
    InvalidTimeRange { start: String, end: String },
}

/// Error body returned by the backend on 4xx/5xx responses
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "error")]
    pub message: String,
}
