// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Decoding of the backend response envelopes
//!
//! Every payload arrives as `{ "data": ... }`, counters as `{ "count": n }`.
//! Anything else is a contract violation and is reported as
//! [`ClientApiError::MalformedResponse`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use sh_api_contract::{CountEnvelope, Envelope};

use crate::error::{ClientApiError, ClientApiResult};

pub fn decode_data<T: DeserializeOwned>(body: Value) -> ClientApiResult<T> {
    if body.get("data").is_none() {
        return Err(ClientApiError::MalformedResponse(
            "expected an object with a `data` field".to_string(),
        ));
    }
    serde_json::from_value::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| ClientApiError::MalformedResponse(e.to_string()))
}

pub fn decode_count(body: Value) -> ClientApiResult<u64> {
    serde_json::from_value::<CountEnvelope>(body)
        .map(|envelope| envelope.count)
        .map_err(|e| ClientApiError::MalformedResponse(e.to_string()))
}
