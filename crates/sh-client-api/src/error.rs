// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Failure taxonomy of a backend exchange
///
/// The store flattens every variant into its `last_error` string; the
/// distinction exists for logging and for callers outside the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientApiError {
    /// No response was received
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a 4xx/5xx status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The backend answered, but not with the agreed envelope
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A payload was rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),
}

impl ClientApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientApiError::Server { status: 404, .. })
    }
}

impl From<sh_api_contract::ApiContractError> for ClientApiError {
    fn from(err: sh_api_contract::ApiContractError) -> Self {
        ClientApiError::Validation(err.to_string())
    }
}

pub type ClientApiResult<T> = Result<T, ClientApiError>;
