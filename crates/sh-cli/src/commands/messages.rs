// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::Write;

use anyhow::{Result, bail};
use clap::Subcommand;
use serde_json::json;
use sh_api_contract::{MessageFilter, MessageFolder, MessageStatus, NewMessage};
use sh_store::AppStore;

use super::{Context, emit_item, emit_json, emit_list, ensure};
use crate::render;

#[derive(Subcommand, Debug, Clone)]
pub enum MessageCommands {
    /// List messages
    List {
        #[arg(long, default_value_t = MessageFolder::Inbox)]
        folder: MessageFolder,
        /// Only messages not read yet
        #[arg(long)]
        unread: bool,
    },
    /// Show one message
    Show { id: String },
    /// Send a message
    Send {
        /// Recipient user id
        #[arg(long)]
        to: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
    },
    /// Mark a message as read
    Read { id: String },
    /// Print the number of unread messages
    Unread,
}

impl MessageCommands {
    pub async fn run(self, app: &AppStore, ctx: &Context, out: &mut dyn Write) -> Result<()> {
        let store = &app.messages;
        match self {
            MessageCommands::List { folder, unread } => {
                let filter = MessageFilter {
                    folder: Some(folder),
                    status: unread.then_some(MessageStatus::Sent),
                };
                let outcome = store.fetch_list(&filter).await;
                ensure(store, outcome)?;
                let state = store.snapshot();
                emit_list(out, ctx, state.collection(), render::message_line)
            }
            MessageCommands::Show { id } => {
                let outcome = store.fetch_item(&id).await;
                ensure(store, outcome)?;
                let state = store.snapshot();
                match state.selected() {
                    Some(message) => emit_item(out, ctx, message, render::message_detail),
                    None => bail!("messages: {id} was not returned"),
                }
            }
            MessageCommands::Send { to, subject, body } => {
                let payload = NewMessage {
                    recipient_id: to,
                    subject,
                    body,
                };
                let outcome = store.create(&payload).await;
                ensure(store, outcome)?;
                // Appended, so the new message is last.
                let state = store.snapshot();
                if let Some(sent) = state.collection().last() {
                    if ctx.json {
                        return emit_json(out, sent);
                    }
                    writeln!(out, "Sent {} to {}", sent.id, sent.recipient.name)?;
                }
                Ok(())
            }
            MessageCommands::Read { id } => {
                // The decrement needs the counter and the unread copy held locally.
                let (counted, fetched) = tokio::join!(store.refresh_counters(), store.fetch_item(&id));
                ensure(store, counted)?;
                ensure(store, fetched)?;

                let outcome = store.mark_read(&id).await;
                ensure(store, outcome)?;
                let unread = store.unread_count();
                if ctx.json {
                    return emit_json(out, &json!({ "id": id, "unreadCount": unread }));
                }
                writeln!(out, "Marked {id} as read ({unread} unread)")?;
                Ok(())
            }
            MessageCommands::Unread => {
                let outcome = store.refresh_counters().await;
                ensure(store, outcome)?;
                let unread = store.unread_count();
                if ctx.json {
                    return emit_json(out, &json!({ "unreadCount": unread }));
                }
                writeln!(out, "{unread}")?;
                Ok(())
            }
        }
    }
}
