// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Transport-neutral description of a backend request

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientApiError, ClientApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl std::fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiMethod::Get => write!(f, "GET"),
            ApiMethod::Post => write!(f, "POST"),
            ApiMethod::Patch => write!(f, "PATCH"),
            ApiMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single request against the backend
///
/// `path` is relative to the service base URL and never starts with `/`,
/// e.g. `announcements` or `messages/42`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: ApiMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: ApiMethod, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            method,
            path: path.trim_start_matches('/').to_string(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Delete, path)
    }

    /// Attach query parameters from a serializable filter; `None` fields are skipped
    pub fn with_query<T: Serialize>(mut self, filter: &T) -> ClientApiResult<Self> {
        self.query = query_pairs(filter)?;
        Ok(self)
    }

    pub fn with_body<T: Serialize>(mut self, body: &T) -> ClientApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientApiError::Validation(format!("Cannot encode request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Path of one record, e.g. `announcements/a%2Fb` for the id `a/b`
///
/// The id is percent-encoded as a single segment so it can never reach into
/// the route or the query string.
pub fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}

/// Flatten a serializable filter struct into query pairs
pub fn query_pairs<T: Serialize>(params: &T) -> ClientApiResult<Vec<(String, String)>> {
    let value = serde_json::to_value(params)
        .map_err(|e| ClientApiError::Validation(format!("Cannot encode query: {e}")))?;

    let mut pairs = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let val_str = match val {
                    Value::Null => continue,
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => other.to_string(),
                };
                pairs.push((key, val_str));
            }
        }
        Value::Null => {}
        other => {
            return Err(ClientApiError::Validation(format!(
                "Query parameters must be an object, got {other}"
            )));
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sh_api_contract::{MessageFilter, MessageFolder, ScheduleFilter, Weekday};

    #[test]
    fn test_query_params_building() {
        let filter = ScheduleFilter {
            section_id: Some("7a".to_string()),
            teacher_id: None,
            day: Some(Weekday::Tuesday),
        };
        let pairs = query_pairs(&filter).unwrap();
        assert!(pairs.contains(&("sectionId".to_string(), "7a".to_string())));
        assert!(pairs.contains(&("day".to_string(), "Tuesday".to_string())));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_unit_filter_has_no_query() {
        assert!(query_pairs(&()).unwrap().is_empty());
    }

    #[test]
    fn test_request_path_is_relative() {
        let request = ApiRequest::get("/messages")
            .with_query(&MessageFilter {
                folder: Some(MessageFolder::Inbox),
                status: None,
            })
            .unwrap();
        assert_eq!(request.path, "messages");
        assert_eq!(request.method, ApiMethod::Get);
        assert_eq!(request.query, vec![("folder".to_string(), "inbox".to_string())]);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path("announcements", "announcement-7"), "announcements/announcement-7");
        assert_eq!(item_path("announcements", "a/b?c#d"), "announcements/a%2Fb%3Fc%23d");
        assert_eq!(item_path("users", "x y"), "users/x%20y");
    }
}
