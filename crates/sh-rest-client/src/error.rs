// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! REST client error types

use reqwest::StatusCode;
use sh_client_api::ClientApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: StatusCode, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type RestClientResult<T> = Result<T, RestClientError>;

impl From<RestClientError> for ClientApiError {
    fn from(err: RestClientError) -> Self {
        match err {
            RestClientError::ServerError { status, message } => ClientApiError::Server {
                status: status.as_u16(),
                message,
            },
            RestClientError::UnexpectedResponse(text) => ClientApiError::MalformedResponse(text),
            RestClientError::Http(e) if e.is_decode() => {
                ClientApiError::MalformedResponse(e.to_string())
            }
            other => ClientApiError::Transport(other.to_string()),
        }
    }
}
