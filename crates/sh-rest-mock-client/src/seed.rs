// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Demo school used by `MockSchoolBackend::with_seed_data`

use chrono::{Duration, TimeZone, Utc};
use serde_json::{Value, json};

use crate::BackendState;

/// The demo backend acts as this student unless told otherwise
pub const DEFAULT_VIEWER_ID: &str = "u-student-1";

pub(crate) fn populate(state: &mut BackendState) {
    for (id, name) in [
        ("math", "Mathematics"),
        ("sci", "Science"),
        ("eng", "English"),
        ("fil", "Filipino"),
        ("ap", "Araling Panlipunan"),
        ("pe", "Physical Education"),
    ] {
        state.subjects.insert(id.to_string(), name.to_string());
    }
    for (id, name) in [("7a", "Grade 7 - Sampaguita"), ("7b", "Grade 7 - Narra")] {
        state.sections.insert(id.to_string(), name.to_string());
    }

    state.records.insert("users".to_string(), users());
    state.records.insert("schedules".to_string(), schedules());
    state.records.insert("announcements".to_string(), announcements());
    state.records.insert("messages".to_string(), messages());
    state.next_id = 100;
}

fn users() -> Vec<Value> {
    vec![
        json!({ "id": "u-admin-1", "name": "Rosa Dimaculangan", "email": "rosa@school.example", "role": "admin" }),
        json!({ "id": "u-teacher-1", "name": "Marco Reyes", "email": "marco@school.example", "role": "teacher" }),
        json!({ "id": "u-teacher-2", "name": "Liza Santos", "email": "liza@school.example", "role": "teacher" }),
        json!({
            "id": "u-student-1", "name": "Jun Villanueva", "email": "jun@school.example", "role": "student",
            "section": { "id": "7a", "name": "Grade 7 - Sampaguita" }
        }),
        json!({
            "id": "u-student-2", "name": "Bea Aquino", "email": "bea@school.example", "role": "student",
            "section": { "id": "7a", "name": "Grade 7 - Sampaguita" }
        }),
        json!({
            "id": "u-student-3", "name": "Paolo Mendoza", "email": "paolo@school.example", "role": "student",
            "section": { "id": "7b", "name": "Grade 7 - Narra" }
        }),
    ]
}

fn schedule(
    id: &str,
    day: &str,
    start: &str,
    end: &str,
    subject: (&str, &str),
    teacher: (&str, &str),
) -> Value {
    json!({
        "id": id,
        "day": day,
        "startTime": start,
        "endTime": end,
        "subject": { "id": subject.0, "name": subject.1 },
        "section": { "id": "7a", "name": "Grade 7 - Sampaguita" },
        "teacher": { "id": teacher.0, "name": teacher.1 },
        "room": "Room 204"
    })
}

fn schedules() -> Vec<Value> {
    let marco = ("u-teacher-1", "Marco Reyes");
    let liza = ("u-teacher-2", "Liza Santos");
    let math = ("math", "Mathematics");
    let sci = ("sci", "Science");
    let eng = ("eng", "English");
    let fil = ("fil", "Filipino");
    let pe = ("pe", "Physical Education");

    // Backend data writes the meridiem marker only some of the time.
    vec![
        schedule("schedule-1", "Monday", "8:00 AM", "9:00 AM", math, marco),
        schedule("schedule-2", "Monday", "9:00", "10:00", sci, liza),
        schedule("schedule-3", "Tuesday", "8:00", "9:00", eng, liza),
        schedule("schedule-4", "Wednesday", "8:00 am", "9:00 am", math, marco),
        schedule("schedule-5", "Wednesday", "10:15", "11:15", fil, liza),
        schedule("schedule-6", "Thursday", "1:00 PM", "2:00 PM", sci, liza),
        schedule("schedule-7", "Friday", "2:00", "3:00", pe, marco),
    ]
}

fn announcements() -> Vec<Value> {
    let base = Utc.with_ymd_and_hms(2025, 6, 16, 7, 30, 0).single().unwrap_or_else(Utc::now);
    vec![
        json!({
            "id": "announcement-2",
            "title": "Science fair entries due",
            "body": "Submit your project abstracts to your adviser by Friday.",
            "audience": "students",
            "author": { "id": "u-teacher-2", "name": "Liza Santos" },
            "createdAt": base + Duration::days(2),
        }),
        json!({
            "id": "announcement-1",
            "title": "Welcome back!",
            "body": "Classes start Monday at 8:00 AM. See you all!",
            "audience": "all",
            "author": { "id": "u-admin-1", "name": "Rosa Dimaculangan" },
            "createdAt": base,
            "attachment": {
                "fileName": "school-calendar.pdf",
                "contentType": "application/pdf",
                "sizeBytes": 182_044
            }
        }),
    ]
}

fn messages() -> Vec<Value> {
    let base = Utc.with_ymd_and_hms(2025, 6, 17, 9, 0, 0).single().unwrap_or_else(Utc::now);
    vec![
        json!({
            "id": "message-1",
            "sender": { "id": "u-teacher-1", "name": "Marco Reyes" },
            "recipient": { "id": "u-student-1", "name": "Jun Villanueva" },
            "subject": "Quiz results",
            "body": "Great work on the algebra quiz.",
            "status": "read",
            "sentAt": base,
        }),
        json!({
            "id": "message-2",
            "sender": { "id": "u-teacher-2", "name": "Liza Santos" },
            "recipient": { "id": "u-student-1", "name": "Jun Villanueva" },
            "subject": "Lab partners",
            "body": "You are paired with Bea for the next experiment.",
            "status": "sent",
            "sentAt": base + Duration::hours(3),
        }),
        json!({
            "id": "message-3",
            "sender": { "id": "u-admin-1", "name": "Rosa Dimaculangan" },
            "recipient": { "id": "u-student-1", "name": "Jun Villanueva" },
            "subject": "ID pickup",
            "body": "Your school ID is ready at the registrar.",
            "status": "sent",
            "sentAt": base + Duration::hours(5),
        }),
        json!({
            "id": "message-4",
            "sender": { "id": "u-student-1", "name": "Jun Villanueva" },
            "recipient": { "id": "u-teacher-1", "name": "Marco Reyes" },
            "subject": "Re: Quiz results",
            "body": "Thank you, sir!",
            "status": "sent",
            "sentAt": base + Duration::hours(6),
        }),
    ]
}
