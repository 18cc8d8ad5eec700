// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Figures shown on the role dashboards
//!
//! Everything here is derived from state the stores already hold. The unread
//! figure comes from the message counters, not from the message list.

use std::collections::HashSet;

use serde::Serialize;
use sh_api_contract::{
    Announcement, Audience, Role, ScheduleEntry, ScheduleFilter, User, Weekday,
};

/// Who is looking at the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: String,
    pub role: Role,
    pub section_id: Option<String>,
}

impl Viewer {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            role: user.role,
            section_id: user.section.as_ref().map(|s| s.id.clone()),
        }
    }

    /// Timetable relevant to this viewer: own section, own classes, or everything
    pub fn schedule_filter(&self) -> ScheduleFilter {
        match self.role {
            Role::Student => ScheduleFilter {
                section_id: self.section_id.clone(),
                ..Default::default()
            },
            Role::Teacher => ScheduleFilter {
                teacher_id: Some(self.id.clone()),
                ..Default::default()
            },
            Role::Admin => ScheduleFilter::default(),
        }
    }

    pub fn can_see(&self, announcement: &Announcement) -> bool {
        match announcement.audience {
            Audience::All => true,
            Audience::Teachers => self.role != Role::Student,
            Audience::Students => self.role != Role::Teacher,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub admins: usize,
    pub teachers: usize,
    pub students: usize,
}

impl RoleCounts {
    pub fn from_users(users: &[User]) -> Self {
        users.iter().fold(Self::default(), |mut counts, user| {
            match user.role {
                Role::Admin => counts.admins += 1,
                Role::Teacher => counts.teachers += 1,
                Role::Student => counts.students += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.admins + self.teachers + self.students
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: RoleCounts,
    pub announcements: usize,
    pub unread_messages: u64,
    pub classes_today: usize,
    pub subjects: Vec<String>,
}

impl DashboardStats {
    pub fn compute(
        users: &[User],
        announcements: &[Announcement],
        unread_messages: u64,
        schedules: &[ScheduleEntry],
        today: Option<Weekday>,
    ) -> Self {
        Self {
            users: RoleCounts::from_users(users),
            announcements: announcements.len(),
            unread_messages,
            classes_today: today.map_or(0, |day| classes_on(schedules, day)),
            subjects: distinct_subjects(schedules),
        }
    }
}

/// Number of classes meeting on `day`
pub fn classes_on(entries: &[ScheduleEntry], day: Weekday) -> usize {
    entries.iter().filter(|entry| entry.day == day).count()
}

/// Subject names in first-seen order
pub fn distinct_subjects(entries: &[ScheduleEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|entry| seen.insert(entry.subject.id.as_str()))
        .map(|entry| entry.subject.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sh_api_contract::{SectionRef, SubjectRef};

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: id.to_string(),
            email: format!("{id}@school.example"),
            role,
            section: (role == Role::Student).then(|| SectionRef {
                id: "7a".to_string(),
                name: "Grade 7".to_string(),
            }),
        }
    }

    fn class(day: Weekday, subject: &str) -> ScheduleEntry {
        ScheduleEntry {
            id: format!("{day}-{subject}"),
            day,
            start_time: "8:00".to_string(),
            end_time: "9:00".to_string(),
            subject: SubjectRef {
                id: subject.to_lowercase(),
                name: subject.to_string(),
            },
            section: None,
            teacher: None,
            room: None,
        }
    }

    fn announcement(audience: Audience) -> Announcement {
        Announcement {
            id: "a".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            audience,
            author: None,
            created_at: Utc::now(),
            attachment: None,
        }
    }

    #[test]
    fn counts_users_per_role() {
        let users = [
            user("a", Role::Admin),
            user("t", Role::Teacher),
            user("s1", Role::Student),
            user("s2", Role::Student),
        ];
        let counts = RoleCounts::from_users(&users);
        assert_eq!(
            counts,
            RoleCounts {
                admins: 1,
                teachers: 1,
                students: 2
            }
        );
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn summarizes_schedule() {
        let entries = [
            class(Weekday::Monday, "Math"),
            class(Weekday::Monday, "Science"),
            class(Weekday::Tuesday, "Math"),
        ];
        let stats = DashboardStats::compute(&[], &[], 3, &entries, Some(Weekday::Monday));

        assert_eq!(stats.classes_today, 2);
        assert_eq!(stats.subjects, vec!["Math".to_string(), "Science".to_string()]);
        assert_eq!(stats.unread_messages, 3);

        let weekend = DashboardStats::compute(&[], &[], 0, &entries, None);
        assert_eq!(weekend.classes_today, 0);
    }

    #[test]
    fn viewer_filters_follow_role() {
        let student = Viewer::from_user(&user("s1", Role::Student));
        assert_eq!(student.schedule_filter().section_id.as_deref(), Some("7a"));

        let teacher = Viewer::from_user(&user("t", Role::Teacher));
        assert_eq!(teacher.schedule_filter().teacher_id.as_deref(), Some("t"));

        let admin = Viewer::from_user(&user("a", Role::Admin));
        assert_eq!(admin.schedule_filter(), ScheduleFilter::default());
    }

    #[test]
    fn announcement_audience() {
        let student = Viewer::from_user(&user("s1", Role::Student));
        let teacher = Viewer::from_user(&user("t", Role::Teacher));

        assert!(student.can_see(&announcement(Audience::All)));
        assert!(!student.can_see(&announcement(Audience::Teachers)));
        assert!(teacher.can_see(&announcement(Audience::Teachers)));
        assert!(!teacher.can_see(&announcement(Audience::Students)));
    }
}
