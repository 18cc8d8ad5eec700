// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Validation helpers for API contract types
//!
//! These checks run on the client before a create request is issued, so a
//! payload the backend would reject never leaves the process.

use crate::error::ApiContractError;
use crate::types::*;
use validator::Validate;

/// Largest attachment accepted on an announcement (5 MiB)
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Content types accepted for announcement attachments
pub const ALLOWED_ATTACHMENT_TYPES: &[&str] = &[
    "application/pdf",
    "image/png",
    "image/jpeg",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Validate an announcement creation payload, including its attachment
pub fn validate_new_announcement(request: &NewAnnouncement) -> Result<(), ApiContractError> {
    request.validate()?;
    if let Some(attachment) = &request.attachment {
        validate_attachment(attachment)?;
    }
    Ok(())
}

/// Validate attachment type and size
pub fn validate_attachment(attachment: &Attachment) -> Result<(), ApiContractError> {
    let content_type = attachment.content_type.trim().to_lowercase();
    if !ALLOWED_ATTACHMENT_TYPES.contains(&content_type.as_str()) {
        return Err(ApiContractError::UnsupportedAttachmentType(
            attachment.content_type.clone(),
        ));
    }
    if attachment.size_bytes > MAX_ATTACHMENT_BYTES {
        return Err(ApiContractError::AttachmentTooLarge {
            size: attachment.size_bytes,
            limit: MAX_ATTACHMENT_BYTES,
        });
    }
    Ok(())
}

/// Guess the content type of an attachment from its file name
pub fn content_type_for_file_name(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "docx" => Some(ALLOWED_ATTACHMENT_TYPES[3]),
        _ => None,
    }
}

pub fn validate_new_message(request: &NewMessage) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}

/// Validate a schedule entry; start and end must differ
pub fn validate_new_schedule_entry(request: &NewScheduleEntry) -> Result<(), ApiContractError> {
    request.validate()?;
    if request.start_time.trim() == request.end_time.trim() {
        return Err(ApiContractError::InvalidTimeRange {
            start: request.start_time.clone(),
            end: request.end_time.clone(),
        });
    }
    Ok(())
}

pub fn validate_new_user(request: &NewUser) -> Result<(), ApiContractError> {
    request.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn announcement(attachment: Option<Attachment>) -> NewAnnouncement {
        NewAnnouncement {
            title: "Foundation Day".to_string(),
            body: "Classes are suspended on Friday.".to_string(),
            audience: Audience::All,
            attachment,
        }
    }

    fn attachment(content_type: &str, size_bytes: u64) -> Attachment {
        Attachment {
            file_name: "memo".to_string(),
            content_type: content_type.to_string(),
            size_bytes,
            url: None,
        }
    }

    #[test]
    fn test_validate_new_announcement_valid() {
        assert!(validate_new_announcement(&announcement(None)).is_ok());
        assert!(
            validate_new_announcement(&announcement(Some(attachment("application/pdf", 1024))))
                .is_ok()
        );
    }

    #[test]
    fn test_validate_new_announcement_empty_title() {
        let mut request = announcement(None);
        request.title.clear();
        let err = validate_new_announcement(&request).unwrap_err();
        assert!(matches!(err, ApiContractError::Validation(_)));
        assert!(err.to_string().contains("Title cannot be empty"));
    }

    #[test]
    fn test_attachment_type_rejected() {
        let err = validate_attachment(&attachment("application/x-msdownload", 10)).unwrap_err();
        assert!(matches!(err, ApiContractError::UnsupportedAttachmentType(_)));
    }

    #[test]
    fn test_attachment_size_limit_is_inclusive() {
        assert!(validate_attachment(&attachment("image/png", MAX_ATTACHMENT_BYTES)).is_ok());
        let err =
            validate_attachment(&attachment("image/png", MAX_ATTACHMENT_BYTES + 1)).unwrap_err();
        assert!(matches!(err, ApiContractError::AttachmentTooLarge { .. }));
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(content_type_for_file_name("Memo.PDF"), Some("application/pdf"));
        assert_eq!(content_type_for_file_name("photo.jpg"), Some("image/jpeg"));
        assert_eq!(content_type_for_file_name("setup.exe"), None);
        assert_eq!(content_type_for_file_name("README"), None);
    }

    #[test]
    fn test_validate_new_user_email() {
        let mut user = NewUser {
            name: "Ana Cruz".to_string(),
            email: "ana@school.example".to_string(),
            role: Role::Teacher,
            section_id: None,
        };
        assert!(validate_new_user(&user).is_ok());
        user.email = "not-an-email".to_string();
        assert!(validate_new_user(&user).is_err());
    }

    #[test]
    fn test_validate_schedule_entry_time_range() {
        let entry = NewScheduleEntry {
            day: Weekday::Tuesday,
            start_time: "9:00".to_string(),
            end_time: "9:00".to_string(),
            subject_id: "sci".to_string(),
            section_id: "7a".to_string(),
            teacher_id: None,
            room: None,
        };
        assert!(matches!(
            validate_new_schedule_entry(&entry),
            Err(ApiContractError::InvalidTimeRange { .. })
        ));
    }

    #[test]
    fn test_validate_new_message() {
        let message = NewMessage {
            recipient_id: "u-2".to_string(),
            subject: String::new(),
            body: "See you".to_string(),
        };
        assert!(validate_new_message(&message).is_err());
    }
}
