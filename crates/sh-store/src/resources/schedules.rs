// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use sh_api_contract::{
    ApiContractError, NewScheduleEntry, ScheduleEntry, ScheduleEntryPatch, ScheduleFilter,
    validate_new_schedule_entry,
};

use crate::resource::{InsertPolicy, Resource};

#[derive(Debug, Clone, Copy)]
pub struct Schedules;

impl Resource for Schedules {
    type Item = ScheduleEntry;
    type Counters = ();
    type Filter = ScheduleFilter;
    type Create = NewScheduleEntry;
    type Update = ScheduleEntryPatch;

    const NAME: &'static str = "schedules";
    const INSERT_POLICY: InsertPolicy = InsertPolicy::Append;

    fn id(item: &ScheduleEntry) -> &str {
        &item.id
    }

    fn validate_create(payload: &NewScheduleEntry) -> Result<(), ApiContractError> {
        validate_new_schedule_entry(payload)
    }
}
