// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Plain-text rendering of store state

use sh_api_contract::{Announcement, Message, ScheduleEntry, User};
use sh_store::{DashboardStats, GridRow, ScheduleGrid};

const TIME_HEADER: &str = "Time";

/// Weekly grid as an aligned text table
///
/// Empty cells print as `-`; break rows print their label across the row.
pub fn render_grid(grid: &ScheduleGrid) -> String {
    let time_width = grid
        .rows
        .iter()
        .filter_map(|row| match row {
            GridRow::Slot { time, .. } => Some(time.len()),
            GridRow::Break { .. } => None,
        })
        .chain(std::iter::once(TIME_HEADER.len()))
        .max()
        .unwrap_or(TIME_HEADER.len());

    let day_widths: Vec<usize> = grid
        .days
        .iter()
        .enumerate()
        .map(|(column, day)| {
            grid.rows
                .iter()
                .filter_map(|row| match row {
                    GridRow::Slot { cells, .. } => cells.get(column).map(|c| c.display().len()),
                    GridRow::Break { .. } => None,
                })
                .chain(std::iter::once(day.as_str().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let total_width = time_width + day_widths.iter().map(|w| w + 3).sum::<usize>();

    let mut lines = Vec::with_capacity(grid.rows.len() + 2);
    let mut header = format!("{TIME_HEADER:<time_width$}");
    for (day, width) in grid.days.iter().zip(&day_widths) {
        header.push_str(&format!(" | {:<width$}", day.as_str()));
    }
    lines.push(header);
    lines.push("-".repeat(total_width));

    for row in &grid.rows {
        match row {
            GridRow::Break { label } => {
                lines.push(format!("{:^total_width$}", format!("~ {label} ~")));
            }
            GridRow::Slot { time, cells } => {
                let mut line = format!("{time:<time_width$}");
                for (cell, width) in cells.iter().zip(&day_widths) {
                    line.push_str(&format!(" | {:<width$}", cell.display()));
                }
                lines.push(line.trim_end().to_string());
            }
        }
    }

    lines.join("\n")
}

pub fn announcement_line(announcement: &Announcement) -> String {
    let clip = if announcement.attachment.is_some() { " [attachment]" } else { "" };
    format!(
        "{}  {}  [{}] {}{}",
        announcement.id,
        announcement.created_at.format("%Y-%m-%d"),
        announcement.audience,
        announcement.title,
        clip
    )
}

pub fn announcement_detail(announcement: &Announcement) -> String {
    let mut out = vec![
        format!("{} ({})", announcement.title, announcement.id),
        format!("Audience: {}", announcement.audience),
        format!("Posted:   {}", announcement.created_at.format("%Y-%m-%d %H:%M UTC")),
    ];
    if let Some(author) = &announcement.author {
        out.push(format!("Author:   {}", author.name));
    }
    if let Some(attachment) = &announcement.attachment {
        out.push(format!(
            "Attached: {} ({}, {} bytes)",
            attachment.file_name, attachment.content_type, attachment.size_bytes
        ));
    }
    out.push(String::new());
    out.push(announcement.body.clone());
    out.join("\n")
}

pub fn message_line(message: &Message) -> String {
    let marker = if message.is_unread() { "*" } else { " " };
    format!(
        "{marker} {}  {}  {} -> {}  {}",
        message.id,
        message.sent_at.format("%Y-%m-%d %H:%M"),
        message.sender.name,
        message.recipient.name,
        message.subject
    )
}

pub fn message_detail(message: &Message) -> String {
    [
        format!("{} ({})", message.subject, message.id),
        format!("From:   {}", message.sender.name),
        format!("To:     {}", message.recipient.name),
        format!("Sent:   {}", message.sent_at.format("%Y-%m-%d %H:%M UTC")),
        format!("Status: {}", message.status),
        String::new(),
        message.body.clone(),
    ]
    .join("\n")
}

pub fn schedule_line(entry: &ScheduleEntry) -> String {
    let mut line = format!(
        "{}  {:<9} {}-{}  {}",
        entry.id, entry.day.as_str(), entry.start_time, entry.end_time, entry.subject.name
    );
    if let Some(section) = &entry.section {
        line.push_str(&format!("  {}", section.name));
    }
    if let Some(teacher) = &entry.teacher {
        line.push_str(&format!("  {}", teacher.name));
    }
    if let Some(room) = &entry.room {
        line.push_str(&format!("  {room}"));
    }
    line
}

pub fn user_line(user: &User) -> String {
    let section = user.section.as_ref().map_or("", |s| s.name.as_str());
    format!("{}  {:<8} {}  <{}>  {}", user.id, user.role.to_string(), user.name, user.email, section)
        .trim_end()
        .to_string()
}

pub fn dashboard(stats: &DashboardStats) -> String {
    let subjects = if stats.subjects.is_empty() {
        "-".to_string()
    } else {
        stats.subjects.join(", ")
    };
    [
        format!(
            "Users:           {} ({} admins, {} teachers, {} students)",
            stats.users.total(),
            stats.users.admins,
            stats.users.teachers,
            stats.users.students
        ),
        format!("Announcements:   {}", stats.announcements),
        format!("Unread messages: {}", stats.unread_messages),
        format!("Classes today:   {}", stats.classes_today),
        format!("Subjects:        {subjects}"),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sh_api_contract::{SubjectRef, Weekday};
    use sh_store::{TimeSlot, project};

    fn entry(day: Weekday, start: &str, end: &str, subject: &str) -> ScheduleEntry {
        ScheduleEntry {
            id: format!("{day}-{start}"),
            day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            subject: SubjectRef {
                id: subject.to_lowercase(),
                name: subject.to_string(),
            },
            section: None,
            teacher: None,
            room: None,
        }
    }

    #[test]
    fn grid_prints_dash_for_empty_cells_and_break_labels() {
        let slots = vec![
            TimeSlot::class("8:00", "9:00"),
            TimeSlot::break_slot("Recess", "9:00", "9:15"),
        ];
        let entries = vec![entry(Weekday::Monday, "8:00 AM", "9:00 AM", "Math")];
        let grid = project(&entries, &slots, &[Weekday::Monday, Weekday::Tuesday]);

        let text = render_grid(&grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Time        | Monday | Tuesday");
        assert_eq!(lines[2], "8:00 - 9:00 | Math   | -");
        assert!(lines[3].contains("~ Recess ~"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn dashboard_lists_figures() {
        let stats = DashboardStats {
            users: Default::default(),
            announcements: 2,
            unread_messages: 1,
            classes_today: 0,
            subjects: vec![],
        };
        let text = dashboard(&stats);
        assert!(text.contains("Unread messages: 1"));
        assert!(text.contains("Subjects:        -"));
    }
}
