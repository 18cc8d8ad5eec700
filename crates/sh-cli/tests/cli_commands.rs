// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Subcommands run end to end against the demo backend

use std::io::Write;
use std::sync::Arc;

use sh_cli::commands::Context;
use sh_cli::{Cli, Commands, Parser, execute};
use sh_rest_mock_client::MockSchoolBackend;
use sh_store::AppStore;

struct Harness {
    backend: MockSchoolBackend,
    app: AppStore,
}

impl Harness {
    fn new() -> Self {
        let backend = MockSchoolBackend::with_seed_data();
        let app = AppStore::new(Arc::new(backend.clone()));
        Self { backend, app }
    }

    async fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("schoolhub").chain(args.iter().copied()))?;
        let ctx = Context {
            json: cli.json,
            viewer_id: cli.viewer.clone(),
            ..Default::default()
        };
        let mut out = Vec::new();
        execute(cli.command, &self.app, &ctx, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }
}

#[tokio::test]
async fn announcements_list_prints_newest_first() {
    let harness = Harness::new();
    let text = harness.run(&["announcements", "list"]).await.unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("announcement-2"));
    assert!(lines[1].contains("[attachment]"));
}

#[tokio::test]
async fn announcement_create_then_show() {
    let harness = Harness::new();
    let text = harness
        .run(&[
            "announcements",
            "create",
            "--title",
            "Foundation Day",
            "--body",
            "No classes on Friday.",
            "--audience",
            "students",
        ])
        .await
        .unwrap();
    let id = text.trim().strip_prefix("Posted ").unwrap().to_string();

    let detail = harness.run(&["announcements", "show", &id]).await.unwrap();
    assert!(detail.starts_with("Foundation Day"));
    assert!(detail.contains("Audience: students"));
}

#[tokio::test]
async fn attachment_of_wrong_type_is_rejected_locally() {
    let harness = Harness::new();
    let mut file = tempfile::Builder::new().suffix(".exe").tempfile().unwrap();
    file.write_all(b"MZ").unwrap();
    let path = file.path().to_string_lossy().into_owned();

    let err = harness
        .run(&["announcements", "create", "--title", "T", "--body", "B", "--attachment", &path])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unsupported attachment type"));

    let posts = harness.backend.requests().await;
    assert!(posts.is_empty(), "nothing reached the backend");
}

#[tokio::test]
async fn deleting_missing_announcement_fails_with_server_message() {
    let harness = Harness::new();
    let err = harness
        .run(&["announcements", "delete", "announcement-404"])
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "announcements: Server error (404): announcements announcement-404 not found"
    );
}

#[tokio::test]
async fn read_decrements_unread_count() {
    let harness = Harness::new();
    assert_eq!(harness.run(&["messages", "unread"]).await.unwrap().trim(), "2");

    let text = harness.run(&["messages", "read", "message-3"]).await.unwrap();
    assert_eq!(text.trim(), "Marked message-3 as read (1 unread)");

    let inbox = harness.run(&["messages", "list", "--unread"]).await.unwrap();
    assert_eq!(inbox.lines().count(), 1);
    assert!(inbox.contains("message-2"));
}

#[tokio::test]
async fn send_message_reports_recipient() {
    let harness = Harness::new();
    let text = harness
        .run(&[
            "messages", "send", "--to", "u-teacher-1", "--subject", "Question", "--body", "When is the quiz?",
        ])
        .await
        .unwrap();
    assert!(text.starts_with("Sent message-"));
    assert!(text.trim_end().ends_with("to Marco Reyes"));
}

#[tokio::test]
async fn schedule_grid_renders_timetable() {
    let harness = Harness::new();
    let text = harness.run(&["schedule", "grid", "--section", "7a"]).await.unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].starts_with("Time"));
    assert!(lines[0].contains("Monday") && lines[0].contains("Friday"));
    assert!(lines[2].starts_with("8:00 AM - 9:00 AM"));
    assert!(lines[2].contains("Mathematics"));
    assert!(lines.iter().any(|line| line.contains("~ Recess ~")));
    assert!(lines.iter().any(|line| line.contains("~ Lunch ~")));
    let cells: Vec<&str> = lines[3].split(" | ").skip(1).map(str::trim).collect();
    assert!(cells.contains(&"-"), "empty cells print a dash");
}

#[tokio::test]
async fn users_list_filters_by_role() {
    let harness = Harness::new();
    let text = harness.run(&["users", "list", "--role", "teacher"]).await.unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().all(|line| line.contains("teacher")));
}

#[tokio::test]
async fn dashboard_as_student() {
    let harness = Harness::new();
    let text = harness
        .run(&["--as", "u-student-1", "dashboard", "--day", "monday"])
        .await
        .unwrap();

    assert!(text.starts_with("Dashboard for u-student-1 (student)"));
    assert!(text.contains("Unread messages: 2"));
    assert!(text.contains("Classes today:   2"));
}

#[tokio::test]
async fn json_output_is_machine_readable() {
    let harness = Harness::new();
    let text = harness.run(&["--json", "users", "list"]).await.unwrap();
    let users: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(users.as_array().map(Vec::len), Some(6));
}

#[test]
fn config_show_parses_without_backend() {
    let cli = Cli::try_parse_from(["schoolhub", "--mock", "config", "show"]).unwrap();
    assert!(cli.mock);
    assert!(matches!(cli.command, Commands::Config { .. }));
}
