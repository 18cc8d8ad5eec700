// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Mock schoolhub backend implementing the ClientApi trait
//!
//! This crate provides an in-memory implementation of the backend contract
//! that answers store requests without making network calls. It keeps JSON
//! records per resource, honours the list filters, echoes deletions, serves
//! the unread-message counter, and can be told to fail or to slow down so
//! tests can exercise the store's error and supersession paths.

mod seed;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value, json};
use sh_client_api::{ApiMethod, ApiRequest, ClientApi, ClientApiError, ClientApiResult};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const RESOURCES: [&str; 4] = ["announcements", "messages", "schedules", "users"];

#[derive(Debug, Default)]
struct BackendState {
    records: HashMap<String, Vec<Value>>,
    subjects: HashMap<String, String>,
    sections: HashMap<String, String>,
    next_id: u64,
    failures: VecDeque<ClientApiError>,
    requests: Vec<ApiRequest>,
}

/// In-memory backend; clones share the same records
#[derive(Debug, Clone)]
pub struct MockSchoolBackend {
    state: Arc<Mutex<BackendState>>,
    /// Id of the signed-in user; drives message folders and authorship
    viewer_id: String,
    /// Configurable delay for every request (in milliseconds)
    delay_ms: u64,
}

impl Default for MockSchoolBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSchoolBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::from_state(BackendState::empty())
    }

    /// Create a backend populated with a small demo school
    pub fn with_seed_data() -> Self {
        let mut state = BackendState::empty();
        seed::populate(&mut state);
        Self::from_state(state)
    }

    fn from_state(state: BackendState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            viewer_id: seed::DEFAULT_VIEWER_ID.to_string(),
            delay_ms: 0,
        }
    }

    /// Answer every request after the given delay
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Act on behalf of another user
    pub fn with_viewer(mut self, viewer_id: impl Into<String>) -> Self {
        self.viewer_id = viewer_id.into();
        self
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    /// Make the next request fail with the given error
    pub async fn fail_next(&self, error: ClientApiError) {
        self.state.lock().await.failures.push_back(error);
    }

    /// Replace the records of a resource
    pub async fn insert_records(&self, resource: &str, records: Vec<Value>) {
        self.state.lock().await.records.insert(resource.to_string(), records);
    }

    /// Snapshot of the records of a resource
    pub async fn records(&self, resource: &str) -> Vec<Value> {
        self.state.lock().await.records.get(resource).cloned().unwrap_or_default()
    }

    /// Every request received so far, in arrival order
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn register_subject(&self, id: &str, name: &str) {
        self.state.lock().await.subjects.insert(id.to_string(), name.to_string());
    }

    pub async fn register_section(&self, id: &str, name: &str) {
        self.state.lock().await.sections.insert(id.to_string(), name.to_string());
    }

    async fn handle(&self, request: ApiRequest) -> ClientApiResult<Value> {
        let mut state = self.state.lock().await;
        state.requests.push(request.clone());
        if let Some(error) = state.failures.pop_front() {
            return Err(error);
        }

        let decoded: Vec<String> = request
            .path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::decode(s).map(|c| c.into_owned()).unwrap_or_else(|_| s.to_string()))
            .collect();
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();
        match (request.method, segments.as_slice()) {
            (ApiMethod::Get, ["messages", "unread", "count"]) => {
                let count = state.list("messages").iter().filter(|m| self.is_unread(m)).count();
                Ok(json!({ "count": count }))
            }
            (ApiMethod::Get, [resource]) => {
                let items: Vec<Value> = state
                    .list(resource)
                    .iter()
                    .filter(|record| self.matches_query(resource, record, &request.query))
                    .cloned()
                    .collect();
                Ok(json!({ "data": items }))
            }
            (ApiMethod::Get, [resource, id]) => {
                let record = state.find(resource, id)?.clone();
                Ok(json!({ "data": record }))
            }
            (ApiMethod::Post, [resource]) => {
                let body = object_body(&request)?;
                let record = self.materialize(&mut state, resource, body)?;
                state.records.entry(resource.to_string()).or_default().push(record.clone());
                Ok(json!({ "data": record }))
            }
            (ApiMethod::Patch, [resource, id]) => {
                let patch = object_body(&request)?;
                let patch = resolve_references(&state, patch);
                let record = state.find_mut(resource, id)?;
                if let Some(fields) = record.as_object_mut() {
                    for (key, value) in patch {
                        fields.insert(key, value);
                    }
                }
                Ok(json!({ "data": record.clone() }))
            }
            (ApiMethod::Delete, [resource, id]) => {
                state.find(resource, id)?;
                if let Some(records) = state.records.get_mut(*resource) {
                    records.retain(|record| record["id"] != *id);
                }
                Ok(json!({ "data": { "id": id } }))
            }
            _ => Err(not_found(format!("no route for {} /{}", request.method, request.path))),
        }
    }

    fn is_unread(&self, message: &Value) -> bool {
        message["status"] == "sent" && message["recipient"]["id"] == self.viewer_id.as_str()
    }

    fn matches_query(&self, resource: &str, record: &Value, query: &[(String, String)]) -> bool {
        query.iter().all(|(key, expected)| {
            if resource == "messages" && key == "folder" {
                let party = if expected == "sent" { "sender" } else { "recipient" };
                return record[party]["id"] == self.viewer_id.as_str();
            }
            match key.strip_suffix("Id") {
                Some(reference) if record.get(key).is_none() => {
                    record[reference]["id"] == expected.as_str()
                }
                _ => match &record[key.as_str()] {
                    Value::String(actual) => actual == expected,
                    Value::Null => false,
                    other => other.to_string() == *expected,
                },
            }
        })
    }

    /// Turn a create payload into the stored record the real backend would return
    fn materialize(
        &self,
        state: &mut BackendState,
        resource: &str,
        body: Map<String, Value>,
    ) -> ClientApiResult<Value> {
        if !RESOURCES.contains(&resource) {
            return Err(not_found(format!("unknown resource {resource}")));
        }

        state.next_id += 1;
        let id = format!("{}-{}", &resource[..resource.len() - 1], state.next_id);
        let viewer = self.viewer_ref(state);
        let mut record = resolve_references(state, body);
        record.insert("id".to_string(), json!(id));

        match resource {
            "announcements" => {
                record.insert("createdAt".to_string(), json!(Utc::now()));
                record.entry("audience").or_insert_with(|| json!("all"));
                record.insert("author".to_string(), viewer);
            }
            "messages" => {
                let recipient_id = record
                    .remove("recipientId")
                    .and_then(|v| v.as_str().map(str::to_string))
                    .ok_or_else(|| bad_request("recipientId is required"))?;
                let recipient = state
                    .list("users")
                    .iter()
                    .find(|user| user["id"] == recipient_id.as_str())
                    .map(|user| json!({ "id": user["id"], "name": user["name"] }))
                    .ok_or_else(|| bad_request(format!("unknown recipient {recipient_id}")))?;
                record.insert("recipient".to_string(), recipient);
                record.insert("sender".to_string(), viewer);
                record.insert("status".to_string(), json!("sent"));
                record.insert("sentAt".to_string(), json!(Utc::now()));
            }
            _ => {}
        }
        Ok(Value::Object(record))
    }

    fn viewer_ref(&self, state: &BackendState) -> Value {
        state
            .list("users")
            .iter()
            .find(|user| user["id"] == self.viewer_id.as_str())
            .map(|user| json!({ "id": user["id"], "name": user["name"] }))
            .unwrap_or_else(|| json!({ "id": self.viewer_id, "name": self.viewer_id }))
    }
}

impl BackendState {
    fn empty() -> Self {
        let mut state = Self::default();
        for resource in RESOURCES {
            state.records.insert(resource.to_string(), Vec::new());
        }
        state
    }

    fn list(&self, resource: &str) -> &[Value] {
        self.records.get(resource).map(Vec::as_slice).unwrap_or(&[])
    }

    fn find(&self, resource: &str, id: &str) -> ClientApiResult<&Value> {
        self.list(resource)
            .iter()
            .find(|record| record["id"] == id)
            .ok_or_else(|| not_found(format!("{resource} {id} not found")))
    }

    fn find_mut(&mut self, resource: &str, id: &str) -> ClientApiResult<&mut Value> {
        self.records
            .get_mut(resource)
            .and_then(|records| records.iter_mut().find(|record| record["id"] == id))
            .ok_or_else(|| not_found(format!("{resource} {id} not found")))
    }
}

/// Replace `subjectId`/`sectionId`/`teacherId` with embedded `{id, name}` references
fn resolve_references(state: &BackendState, mut body: Map<String, Value>) -> Map<String, Value> {
    for reference in ["subject", "section", "teacher"] {
        let key = format!("{reference}Id");
        let Some(Value::String(id)) = body.remove(&key) else {
            continue;
        };
        let name = match reference {
            "subject" => state.subjects.get(&id).cloned(),
            "section" => state.sections.get(&id).cloned(),
            _ => state
                .list("users")
                .iter()
                .find(|user| user["id"] == id.as_str())
                .and_then(|user| user["name"].as_str().map(str::to_string)),
        };
        let name = name.unwrap_or_else(|| id.clone());
        body.insert(reference.to_string(), json!({ "id": id, "name": name }));
    }
    body
}

fn object_body(request: &ApiRequest) -> ClientApiResult<Map<String, Value>> {
    match &request.body {
        Some(Value::Object(map)) => Ok(map.clone()),
        _ => Err(bad_request("request body must be a JSON object")),
    }
}

fn not_found(message: impl Into<String>) -> ClientApiError {
    ClientApiError::Server {
        status: 404,
        message: message.into(),
    }
}

fn bad_request(message: impl Into<String>) -> ClientApiError {
    ClientApiError::Server {
        status: 400,
        message: message.into(),
    }
}

#[async_trait]
impl ClientApi for MockSchoolBackend {
    async fn execute(&self, request: ApiRequest) -> ClientApiResult<Value> {
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        tracing::debug!(method = %request.method, path = %request.path, "mock backend request");
        self.handle(request).await
    }
}
