// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::Write;

use anyhow::{Result, bail};
use chrono::Datelike;
use clap::Args;
use sh_api_contract::Weekday;
use sh_store::{AppStore, Viewer};
use tracing::debug;

use super::{Context, emit_json, ensure};
use crate::render;

#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    /// Day counted as "today" (defaults to the current weekday)
    #[arg(long)]
    pub day: Option<Weekday>,
}

impl DashboardArgs {
    pub async fn run(self, app: &AppStore, ctx: &Context, out: &mut dyn Write) -> Result<()> {
        let viewer = match &ctx.viewer_id {
            Some(id) => {
                let outcome = app.users.fetch_item(id).await;
                ensure(&app.users, outcome)?;
                app.users.read(|state| state.selected().map(Viewer::from_user))
            }
            None => None,
        };
        debug!(viewer = ?viewer.as_ref().map(|v| &v.id), "refreshing dashboard");

        let outcomes = app.refresh_dashboard(viewer.as_ref()).await;
        let failed: Vec<String> = app
            .errors()
            .into_iter()
            .map(|(resource, error)| format!("{resource}: {error}"))
            .collect();
        if !failed.is_empty() {
            bail!("dashboard could not be loaded\n  {}", failed.join("\n  "));
        }
        if let Some((resource, _)) = outcomes.iter().find(|(_, outcome)| !outcome.is_success()) {
            bail!("{resource}: request was superseded by a newer one");
        }

        let today = self
            .day
            .or_else(|| Weekday::from_chrono(chrono::Local::now().weekday()));
        let stats = app.dashboard_stats(viewer.as_ref(), today);
        if ctx.json {
            return emit_json(out, &stats);
        }
        if let Some(viewer) = &viewer {
            writeln!(out, "Dashboard for {} ({})", viewer.id, viewer.role)?;
        }
        writeln!(out, "{}", render::dashboard(&stats))?;
        Ok(())
    }
}
