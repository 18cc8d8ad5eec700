// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Exact requests issued by the store, checked with a mocked transport

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use serde_json::{Value, json};
use sh_api_contract::{
    AnnouncementFilter, Attachment, Audience, MessageFolder, MessageFilter, NewAnnouncement,
    NewScheduleEntry, Weekday,
};
use sh_client_api::{ApiMethod, ApiRequest, ClientApi, ClientApiError, ClientApiResult};
use sh_store::{
    Announcements, Messages, OperationClass, OperationOutcome, RequestStatus, ResourceStore,
    Schedules,
};

mock! {
    pub Api {}

    #[async_trait]
    impl ClientApi for Api {
        async fn execute(&self, request: ApiRequest) -> ClientApiResult<Value>;
    }
}

fn announcement_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "body": "Body",
        "audience": "students",
        "createdAt": "2025-06-16T07:30:00Z"
    })
}

fn message_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "sender": { "id": "u-teacher-1", "name": "Marco Reyes" },
        "recipient": { "id": "u-student-1", "name": "Jun Villanueva" },
        "subject": "Quiz",
        "body": "See me",
        "status": status,
        "sentAt": "2025-06-17T09:00:00Z"
    })
}

#[tokio::test]
async fn list_fetch_sends_filter_as_query() {
    let mut api = MockApi::new();
    api.expect_execute()
        .withf(|req| {
            req.method == ApiMethod::Get
                && req.path == "announcements"
                && req.query == vec![("audience".to_string(), "students".to_string())]
                && req.body.is_none()
        })
        .times(1)
        .returning(|_| Ok(json!({ "data": [announcement_json("a1", "Exam week")] })));

    let store = ResourceStore::<Announcements>::new(Arc::new(api));
    let filter = AnnouncementFilter {
        audience: Some(Audience::Students),
    };
    assert_eq!(store.fetch_list(&filter).await, OperationOutcome::Succeeded);

    let state = store.snapshot();
    assert_eq!(state.collection().len(), 1);
    assert_eq!(state.collection()[0].title, "Exam week");
    assert_eq!(state.status(OperationClass::ListFetch), RequestStatus::Succeeded);
}

#[tokio::test]
async fn item_id_is_encoded_as_one_path_segment() {
    let mut api = MockApi::new();
    api.expect_execute()
        .withf(|req| {
            req.method == ApiMethod::Get && req.path == "announcements/a%2Fb%3Fc" && req.query.is_empty()
        })
        .times(1)
        .returning(|_| Ok(json!({ "data": announcement_json("a/b?c", "Odd id") })));

    let store = ResourceStore::<Announcements>::new(Arc::new(api));
    assert_eq!(store.fetch_item("a/b?c").await, OperationOutcome::Succeeded);
    assert_eq!(store.read(|s| s.selected().map(|a| a.id.clone())), Some("a/b?c".to_string()));
}

#[tokio::test]
async fn invalid_attachment_never_reaches_transport() {
    let mut api = MockApi::new();
    api.expect_execute().never();

    let store = ResourceStore::<Announcements>::new(Arc::new(api));
    let payload = NewAnnouncement {
        title: "Field trip".to_string(),
        body: "Bring your permit.".to_string(),
        audience: Audience::All,
        attachment: Some(Attachment {
            file_name: "permit.exe".to_string(),
            content_type: "application/x-msdownload".to_string(),
            size_bytes: 1024,
            url: None,
        }),
    };

    assert_eq!(store.create(&payload).await, OperationOutcome::Failed);
    let state = store.snapshot();
    assert_eq!(state.status(OperationClass::Create), RequestStatus::Failed);
    assert!(state
        .last_error()
        .unwrap()
        .contains("Unsupported attachment type"));
}

#[tokio::test]
async fn schedule_create_posts_payload() {
    let mut api = MockApi::new();
    api.expect_execute()
        .withf(|req| {
            req.method == ApiMethod::Post
                && req.path == "schedules"
                && req.body.as_ref().and_then(|b| b.get("subjectId")) == Some(&json!("math"))
        })
        .times(1)
        .returning(|_| {
            Ok(json!({ "data": {
                "id": "schedule-9",
                "day": "Monday",
                "startTime": "8:00",
                "endTime": "9:00",
                "subject": { "id": "math", "name": "Mathematics" }
            }}))
        });

    let store = ResourceStore::<Schedules>::new(Arc::new(api));
    let payload = NewScheduleEntry {
        day: Weekday::Monday,
        start_time: "8:00".to_string(),
        end_time: "9:00".to_string(),
        subject_id: "math".to_string(),
        section_id: "7a".to_string(),
        teacher_id: None,
        room: None,
    };
    assert!(store.create(&payload).await.is_success());
    assert_eq!(store.snapshot().collection()[0].id, "schedule-9");
}

#[tokio::test]
async fn mark_read_patches_status() {
    let mut api = MockApi::new();
    api.expect_execute()
        .withf(|req| req.method == ApiMethod::Get && req.path == "messages")
        .times(1)
        .returning(|_| Ok(json!({ "data": [message_json("m1", "sent")] })));
    api.expect_execute()
        .withf(|req| req.path == "messages/unread/count")
        .times(1)
        .returning(|_| Ok(json!({ "count": 4 })));
    api.expect_execute()
        .withf(|req| {
            req.method == ApiMethod::Patch
                && req.path == "messages/m1"
                && req.body == Some(json!({ "status": "read" }))
        })
        .times(1)
        .returning(|_| Ok(json!({ "data": message_json("m1", "read") })));

    let store = ResourceStore::<Messages>::new(Arc::new(api));
    let inbox = MessageFilter {
        folder: Some(MessageFolder::Inbox),
        status: None,
    };
    assert!(store.fetch_list(&inbox).await.is_success());
    assert!(store.refresh_counters().await.is_success());
    assert_eq!(store.unread_count(), 4);

    assert!(store.mark_read("m1").await.is_success());
    assert_eq!(store.unread_count(), 3);
}

#[tokio::test]
async fn delete_requires_matching_echo() {
    let mut api = MockApi::new();
    api.expect_execute()
        .withf(|req| req.method == ApiMethod::Delete && req.path == "announcements/a1")
        .times(1)
        .returning(|_| Ok(json!({ "data": { "id": "a2" } })));

    let store = ResourceStore::<Announcements>::new(Arc::new(api));
    assert_eq!(store.delete("a1").await, OperationOutcome::Failed);
    assert!(store
        .snapshot()
        .last_error()
        .unwrap()
        .starts_with("Malformed response"));
}

#[tokio::test]
async fn response_without_envelope_is_a_failure() {
    let mut api = MockApi::new();
    api.expect_execute()
        .times(1)
        .returning(|_| Ok(json!([announcement_json("a1", "Bare list")])));

    let store = ResourceStore::<Announcements>::new(Arc::new(api));
    assert_eq!(
        store.fetch_list(&AnnouncementFilter::default()).await,
        OperationOutcome::Failed
    );
    assert!(store.snapshot().collection().is_empty());
}

#[tokio::test]
async fn server_message_surfaces_as_last_error() {
    let mut api = MockApi::new();
    api.expect_execute().times(1).returning(|_| {
        Err(ClientApiError::Server {
            status: 404,
            message: "Announcement not found".to_string(),
        })
    });

    let store = ResourceStore::<Announcements>::new(Arc::new(api));
    assert_eq!(store.fetch_item("missing").await, OperationOutcome::Failed);

    let state = store.snapshot();
    assert_eq!(
        state.last_error(),
        Some("Server error (404): Announcement not found")
    );
    assert_eq!(
        state.operation(OperationClass::ItemFetch).error.as_deref(),
        state.last_error()
    );
    assert!(state.selected().is_none());
}
