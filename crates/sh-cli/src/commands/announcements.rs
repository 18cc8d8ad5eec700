// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Subcommand;
use sh_api_contract::{
    AnnouncementFilter, Attachment, Audience, NewAnnouncement, content_type_for_file_name,
};
use sh_store::AppStore;

use super::{Context, emit_item, emit_list, ensure};
use crate::render;

#[derive(Subcommand, Debug, Clone)]
pub enum AnnouncementCommands {
    /// List announcements, newest first
    List {
        /// Only announcements addressed to this audience
        #[arg(long)]
        audience: Option<Audience>,
    },
    /// Show one announcement
    Show { id: String },
    /// Post a new announcement
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long, default_value_t = Audience::All)]
        audience: Audience,
        /// File to attach (PDF, PNG, JPEG or DOCX, at most 5 MiB)
        #[arg(long)]
        attachment: Option<PathBuf>,
    },
    /// Delete an announcement
    Delete { id: String },
}

impl AnnouncementCommands {
    pub async fn run(self, app: &AppStore, ctx: &Context, out: &mut dyn Write) -> Result<()> {
        let store = &app.announcements;
        match self {
            AnnouncementCommands::List { audience } => {
                let outcome = store.fetch_list(&AnnouncementFilter { audience }).await;
                ensure(store, outcome)?;
                let items = store.snapshot();
                emit_list(out, ctx, items.collection(), render::announcement_line)
            }
            AnnouncementCommands::Show { id } => {
                let outcome = store.fetch_item(&id).await;
                ensure(store, outcome)?;
                let state = store.snapshot();
                match state.selected() {
                    Some(item) => emit_item(out, ctx, item, render::announcement_detail),
                    None => anyhow::bail!("announcements: {id} was not returned"),
                }
            }
            AnnouncementCommands::Create {
                title,
                body,
                audience,
                attachment,
            } => {
                let attachment = attachment.as_deref().map(attachment_from_file).transpose()?;
                let payload = NewAnnouncement {
                    title,
                    body,
                    audience,
                    attachment,
                };
                let outcome = store.create(&payload).await;
                ensure(store, outcome)?;
                // Prepended, so the new announcement is first.
                let state = store.snapshot();
                match state.collection().first() {
                    Some(created) if ctx.json => emit_item(out, ctx, created, render::announcement_detail),
                    Some(created) => {
                        writeln!(out, "Posted {}", created.id)?;
                        Ok(())
                    }
                    None => Ok(()),
                }
            }
            AnnouncementCommands::Delete { id } => {
                let outcome = store.delete(&id).await;
                ensure(store, outcome)?;
                writeln!(out, "Deleted {id}")?;
                Ok(())
            }
        }
    }
}

/// Describe a local file as an attachment; the store validates type and size
fn attachment_from_file(path: &Path) -> Result<Attachment> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("reading attachment {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let content_type = content_type_for_file_name(&file_name)
        .unwrap_or("application/octet-stream")
        .to_string();

    Ok(Attachment {
        file_name,
        content_type,
        size_bytes: metadata.len(),
        url: None,
    })
}
