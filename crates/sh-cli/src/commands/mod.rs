// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Subcommands: each one dispatches store intents, then renders the state

pub mod announcements;
pub mod dashboard;
pub mod messages;
pub mod schedule;
pub mod users;

use std::io::Write;

use anyhow::{Context as _, Result, bail};
use serde::Serialize;
use sh_store::{OperationOutcome, Resource, ResourceStore};

use crate::config::TimetableConfig;

/// Settings shared by all subcommands
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub timetable: TimetableConfig,
    /// Print JSON instead of text
    pub json: bool,
    /// User the session acts as, if known
    pub viewer_id: Option<String>,
}

/// Turn an intent outcome into a command result carrying the store's `last_error`
pub(crate) fn ensure<R: Resource>(store: &ResourceStore<R>, outcome: OperationOutcome) -> Result<()> {
    match outcome {
        OperationOutcome::Succeeded => Ok(()),
        OperationOutcome::Superseded => bail!("{}: request was superseded by a newer one", R::NAME),
        OperationOutcome::Failed => {
            let error = store.read(|state| {
                state.last_error().unwrap_or("unknown error").to_string()
            });
            bail!("{}: {error}", R::NAME)
        }
    }
}

pub(crate) fn emit_list<T: Serialize>(
    out: &mut dyn Write,
    ctx: &Context,
    items: &[T],
    line: impl Fn(&T) -> String,
) -> Result<()> {
    if ctx.json {
        return emit_json(out, items);
    }
    if items.is_empty() {
        writeln!(out, "(none)")?;
    }
    for item in items {
        writeln!(out, "{}", line(item))?;
    }
    Ok(())
}

pub(crate) fn emit_item<T: Serialize>(
    out: &mut dyn Write,
    ctx: &Context,
    item: &T,
    detail: impl Fn(&T) -> String,
) -> Result<()> {
    if ctx.json {
        return emit_json(out, item);
    }
    writeln!(out, "{}", detail(item))?;
    Ok(())
}

pub(crate) fn emit_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("encoding output as JSON")?;
    writeln!(out, "{text}")?;
    Ok(())
}
