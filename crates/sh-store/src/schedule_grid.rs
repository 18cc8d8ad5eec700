// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Day by time-slot projection of schedule entries
//!
//! [`project`] is pure and total: the same entries, slots and days always
//! produce the same grid, and no input makes it fail. Rows follow the slot
//! order and cells follow the day order exactly as given.
//!
//! When several entries match one (day, slot) cell, the first one in input
//! order is shown. That tie-break mirrors existing portal behavior and is
//! not a confirmed rule; overlapping entries are a data problem upstream.

use serde::{Deserialize, Serialize};
use sh_api_contract::{ScheduleEntry, Weekday};

/// Placeholder printed for a cell without a class
pub const EMPTY_CELL: &str = "-";

/// One row key of the weekly timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeSlot {
    pub label: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_break: bool,
}

impl TimeSlot {
    pub fn class(start_time: &str, end_time: &str) -> Self {
        Self {
            label: format!("{start_time} - {end_time}"),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            is_break: false,
        }
    }

    pub fn break_slot(label: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            label: label.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            is_break: true,
        }
    }

    fn matches(&self, entry: &ScheduleEntry) -> bool {
        normalize_time(&entry.start_time) == normalize_time(&self.start_time)
            && normalize_time(&entry.end_time) == normalize_time(&self.end_time)
    }
}

/// The standard school day
pub fn default_slots() -> Vec<TimeSlot> {
    vec![
        TimeSlot::class("8:00 AM", "9:00 AM"),
        TimeSlot::class("9:00 AM", "10:00 AM"),
        TimeSlot::break_slot("Recess", "10:00 AM", "10:15 AM"),
        TimeSlot::class("10:15 AM", "11:15 AM"),
        TimeSlot::class("11:15 AM", "12:15 PM"),
        TimeSlot::break_slot("Lunch", "12:15 PM", "1:00 PM"),
        TimeSlot::class("1:00 PM", "2:00 PM"),
        TimeSlot::class("2:00 PM", "3:00 PM"),
    ]
}

/// Comparison key of a clock time
///
/// Trims, lowercases and drops a trailing `am`/`pm` marker, so `"8:00 AM"`
/// and `"8:00"` compare equal. No hour arithmetic: `"13:00"` and `"1:00 PM"`
/// stay distinct, as do `"08:00"` and `"8:00"`.
pub fn normalize_time(raw: &str) -> String {
    let text = raw.trim().to_ascii_lowercase();
    let clock = text
        .strip_suffix("am")
        .or_else(|| text.strip_suffix("pm"))
        .unwrap_or(&text);
    clock.trim().to_string()
}

/// What a filled cell shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellContent {
    pub entry_id: String,
    pub subject: String,
    pub teacher: Option<String>,
    pub section: Option<String>,
    pub room: Option<String>,
}

impl From<&ScheduleEntry> for CellContent {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            entry_id: entry.id.clone(),
            subject: entry.subject.name.clone(),
            teacher: entry.teacher.as_ref().map(|t| t.name.clone()),
            section: entry.section.as_ref().map(|s| s.name.clone()),
            room: entry.room.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub day: Weekday,
    pub content: Option<CellContent>,
}

impl GridCell {
    /// Subject name, or the placeholder dash
    pub fn display(&self) -> &str {
        self.content.as_ref().map_or(EMPTY_CELL, |c| c.subject.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridRow {
    Break { label: String },
    Slot { time: String, cells: Vec<GridCell> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleGrid {
    pub days: Vec<Weekday>,
    pub rows: Vec<GridRow>,
}

impl ScheduleGrid {
    /// Cell at (`time` row label, `day`), if both exist
    pub fn cell(&self, time: &str, day: Weekday) -> Option<&GridCell> {
        self.rows.iter().find_map(|row| match row {
            GridRow::Slot { time: label, cells } if label == time => {
                cells.iter().find(|cell| cell.day == day)
            }
            _ => None,
        })
    }

    /// Number of filled cells
    pub fn filled(&self) -> usize {
        self.rows
            .iter()
            .map(|row| match row {
                GridRow::Slot { cells, .. } => cells.iter().filter(|c| c.content.is_some()).count(),
                GridRow::Break { .. } => 0,
            })
            .sum()
    }
}

/// Project schedule entries onto a day by slot grid
pub fn project(entries: &[ScheduleEntry], slots: &[TimeSlot], days: &[Weekday]) -> ScheduleGrid {
    let rows = slots
        .iter()
        .map(|slot| {
            if slot.is_break {
                return GridRow::Break {
                    label: slot.label.clone(),
                };
            }
            let cells = days
                .iter()
                .map(|&day| GridCell {
                    day,
                    content: entries
                        .iter()
                        .find(|entry| entry.day == day && slot.matches(entry))
                        .map(CellContent::from),
                })
                .collect();
            GridRow::Slot {
                time: slot.label.clone(),
                cells,
            }
        })
        .collect();

    ScheduleGrid {
        days: days.to_vec(),
        rows,
    }
}
