// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! API contract types for the schoolhub REST service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// School week days used by the timetable
///
/// Parsing is case-insensitive and also takes the usual abbreviations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    #[strum(to_string = "Monday", serialize = "Mon")]
    Monday,
    #[strum(to_string = "Tuesday", serialize = "Tue", serialize = "Tues")]
    Tuesday,
    #[strum(to_string = "Wednesday", serialize = "Wed")]
    Wednesday,
    #[strum(to_string = "Thursday", serialize = "Thu", serialize = "Thur", serialize = "Thurs")]
    Thursday,
    #[strum(to_string = "Friday", serialize = "Fri")]
    Friday,
}

impl Weekday {
    /// All school days in calendar order
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Three-letter label used in compact grid headers
    pub fn short(&self) -> &'static str {
        &self.as_str()[..3]
    }

    /// Map a calendar day onto a school day; weekends have no counterpart
    pub fn from_chrono(day: chrono::Weekday) -> Option<Self> {
        match day {
            chrono::Weekday::Mon => Some(Weekday::Monday),
            chrono::Weekday::Tue => Some(Weekday::Tuesday),
            chrono::Weekday::Wed => Some(Weekday::Wednesday),
            chrono::Weekday::Thu => Some(Weekday::Thursday),
            chrono::Weekday::Fri => Some(Weekday::Friday),
            chrono::Weekday::Sat | chrono::Weekday::Sun => None,
        }
    }
}

/// Account role; decides which dashboard a user sees
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

/// Who an announcement is addressed to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Audience {
    #[default]
    All,
    Teachers,
    Students,
}

/// Delivery state of a direct message
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MessageStatus {
    Sent,
    Read,
}

/// Mailbox view requested when listing messages
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MessageFolder {
    Inbox,
    Sent,
}

/// Lightweight reference to a user embedded in other records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

/// Reference to a subject (e.g. "Mathematics")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
    pub id: String,
    pub name: String,
}

/// Reference to a class section (e.g. "Grade 7 - Rizal")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    pub id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

/// File attached to an announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub audience: Audience,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

/// Announcement creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Body cannot be empty"))]
    pub body: String,
    #[serde(default)]
    pub audience: Audience,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnouncementFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: UserRef,
    pub recipient: UserRef,
    pub subject: String,
    pub body: String,
    pub status: MessageStatus,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn is_unread(&self) -> bool {
        self.status == MessageStatus::Sent
    }
}

/// Message send payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[validate(length(min = 1, message = "Recipient is required"))]
    pub recipient_id: String,
    #[validate(length(min = 1, message = "Subject cannot be empty"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Message body cannot be empty"))]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<MessageFolder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

/// One weekly class meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: String,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub subject: SubjectRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleEntry {
    pub day: Weekday,
    #[validate(length(min = 1, message = "Start time is required"))]
    pub start_time: String,
    #[validate(length(min = 1, message = "End time is required"))]
    pub end_time: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject_id: String,
    #[validate(length(min = 1, message = "Section is required"))]
    pub section_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Standard success envelope: `{ "data": <payload> }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Counter envelope: `{ "count": <n> }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEnvelope {
    pub count: u64,
}

/// Payload echoed by `DELETE /{resource}/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_parses_full_and_abbreviated_names() {
        assert_eq!("monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("Wed".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert_eq!("FRIDAY".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert_eq!("thurs".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert!("Saturday".parse::<Weekday>().is_err());
        assert!("t".parse::<Weekday>().is_err());
        assert_eq!(Weekday::Tuesday.to_string(), "Tuesday");
    }

    #[test]
    fn weekday_from_chrono_skips_weekends() {
        assert_eq!(
            Weekday::from_chrono(chrono::Weekday::Thu),
            Some(Weekday::Thursday)
        );
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Sun), None);
    }

    #[test]
    fn schedule_entry_uses_camel_case_on_the_wire() {
        let json = serde_json::json!({
            "id": "s1",
            "day": "Monday",
            "startTime": "8:00 AM",
            "endTime": "9:00 AM",
            "subject": { "id": "math", "name": "Mathematics" },
            "section": { "id": "7a", "name": "Grade 7 - A" }
        });
        let entry: ScheduleEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.day, Weekday::Monday);
        assert_eq!(entry.start_time, "8:00 AM");
        assert!(entry.teacher.is_none());
    }

    #[test]
    fn enums_round_trip_through_strings() {
        assert_eq!("Teacher".parse::<Role>().unwrap(), Role::Teacher);
        assert_eq!(Role::Student.to_string(), "student");
        assert_eq!(MessageStatus::Read.to_string(), "read");
        assert_eq!("inbox".parse::<MessageFolder>().unwrap(), MessageFolder::Inbox);
        assert_eq!(
            serde_json::to_value(Audience::Teachers).unwrap(),
            serde_json::json!("teachers")
        );
    }

    #[test]
    fn empty_filters_serialize_to_empty_objects() {
        let value = serde_json::to_value(MessageFilter::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
