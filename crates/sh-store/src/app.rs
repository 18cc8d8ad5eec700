// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;

use sh_api_contract::{AnnouncementFilter, UserFilter, Weekday};
use sh_client_api::ClientApi;

use crate::dashboard::{DashboardStats, Viewer};
use crate::resource::Resource;
use crate::resources::{Announcements, Messages, Schedules, Users};
use crate::store::{OperationOutcome, ResourceStore};

/// All resource stores of one portal session
///
/// Constructed explicitly and passed to whoever needs it; every store starts
/// empty and idle and shares the same transport.
#[derive(Debug)]
pub struct AppStore {
    pub announcements: ResourceStore<Announcements>,
    pub messages: ResourceStore<Messages>,
    pub schedules: ResourceStore<Schedules>,
    pub users: ResourceStore<Users>,
}

impl AppStore {
    pub fn new(api: Arc<dyn ClientApi>) -> Self {
        Self {
            announcements: ResourceStore::new(Arc::clone(&api)),
            messages: ResourceStore::new(Arc::clone(&api)),
            schedules: ResourceStore::new(Arc::clone(&api)),
            users: ResourceStore::new(api),
        }
    }

    /// Load everything a dashboard shows, concurrently
    ///
    /// The timetable is narrowed to what `viewer` attends or teaches.
    pub async fn refresh_dashboard(
        &self,
        viewer: Option<&Viewer>,
    ) -> Vec<(&'static str, OperationOutcome)> {
        let user_filter = UserFilter::default();
        let announcement_filter = AnnouncementFilter::default();
        let schedule_filter = viewer.map(Viewer::schedule_filter).unwrap_or_default();
        let (users, announcements, unread, schedules) = tokio::join!(
            self.users.fetch_list(&user_filter),
            self.announcements.fetch_list(&announcement_filter),
            self.messages.refresh_counters(),
            self.schedules.fetch_list(&schedule_filter),
        );
        vec![
            (Users::NAME, users),
            (Announcements::NAME, announcements),
            (Messages::NAME, unread),
            (Schedules::NAME, schedules),
        ]
    }

    /// Dashboard figures from the currently held state
    pub fn dashboard_stats(&self, viewer: Option<&Viewer>, today: Option<Weekday>) -> DashboardStats {
        let users = self.users.snapshot();
        let announcements: Vec<_> = self.announcements.read(|state| {
            state
                .collection()
                .iter()
                .filter(|a| viewer.map_or(true, |v| v.can_see(a)))
                .cloned()
                .collect()
        });
        let schedules = self.schedules.snapshot();
        DashboardStats::compute(
            users.collection(),
            &announcements,
            self.messages.unread_count(),
            schedules.collection(),
            today,
        )
    }

    /// Current `last_error` of every store that has one
    pub fn errors(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();
        let mut push = |name: &'static str, error: Option<String>| {
            if let Some(error) = error {
                errors.push((name, error));
            }
        };
        push(Announcements::NAME, self.announcements.read(|s| s.last_error().map(str::to_string)));
        push(Messages::NAME, self.messages.read(|s| s.last_error().map(str::to_string)));
        push(Schedules::NAME, self.schedules.read(|s| s.last_error().map(str::to_string)));
        push(Users::NAME, self.users.read(|s| s.last_error().map(str::to_string)));
        errors
    }
}
