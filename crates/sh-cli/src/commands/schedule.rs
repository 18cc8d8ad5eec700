// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use sh_api_contract::{ScheduleFilter, Weekday};
use sh_store::{AppStore, project};

use super::{Context, emit_json, emit_list, ensure};
use crate::render;

#[derive(Args, Debug, Clone, Default)]
pub struct ScheduleScope {
    /// Section id, e.g. `7a`
    #[arg(long)]
    pub section: Option<String>,
    /// Teacher user id
    #[arg(long)]
    pub teacher: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScheduleCommands {
    /// List schedule entries
    List {
        #[command(flatten)]
        scope: ScheduleScope,
        #[arg(long)]
        day: Option<Weekday>,
    },
    /// Print the weekly timetable as a grid
    Grid {
        #[command(flatten)]
        scope: ScheduleScope,
    },
}

impl ScheduleCommands {
    pub async fn run(self, app: &AppStore, ctx: &Context, out: &mut dyn Write) -> Result<()> {
        let store = &app.schedules;
        match self {
            ScheduleCommands::List { scope, day } => {
                let filter = ScheduleFilter {
                    section_id: scope.section,
                    teacher_id: scope.teacher,
                    day,
                };
                let outcome = store.fetch_list(&filter).await;
                ensure(store, outcome)?;
                let state = store.snapshot();
                emit_list(out, ctx, state.collection(), render::schedule_line)
            }
            ScheduleCommands::Grid { scope } => {
                let filter = ScheduleFilter {
                    section_id: scope.section,
                    teacher_id: scope.teacher,
                    day: None,
                };
                let outcome = store.fetch_list(&filter).await;
                ensure(store, outcome)?;

                let grid = store.read(|state| {
                    project(state.collection(), &ctx.timetable.slots, &ctx.timetable.days)
                });
                if ctx.json {
                    return emit_json(out, &grid);
                }
                writeln!(out, "{}", render::render_grid(&grid))?;
                Ok(())
            }
        }
    }
}
