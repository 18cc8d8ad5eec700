// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use sh_api_contract::{
    Announcement, AnnouncementFilter, AnnouncementPatch, ApiContractError, NewAnnouncement,
    validate_new_announcement,
};

use crate::resource::{InsertPolicy, Resource};

/// School-wide announcements, newest first
#[derive(Debug, Clone, Copy)]
pub struct Announcements;

impl Resource for Announcements {
    type Item = Announcement;
    type Counters = ();
    type Filter = AnnouncementFilter;
    type Create = NewAnnouncement;
    type Update = AnnouncementPatch;

    const NAME: &'static str = "announcements";
    const INSERT_POLICY: InsertPolicy = InsertPolicy::Prepend;

    fn id(item: &Announcement) -> &str {
        &item.id
    }

    fn validate_create(payload: &NewAnnouncement) -> Result<(), ApiContractError> {
        validate_new_announcement(payload)
    }
}
