// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use sh_api_contract::{Role, UserFilter};
use sh_store::AppStore;

use super::{Context, emit_list, ensure};
use crate::render;

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommands {
    /// List users
    List {
        #[arg(long)]
        role: Option<Role>,
        /// Section id, e.g. `7a`
        #[arg(long)]
        section: Option<String>,
    },
}

impl UserCommands {
    pub async fn run(self, app: &AppStore, ctx: &Context, out: &mut dyn Write) -> Result<()> {
        let store = &app.users;
        match self {
            UserCommands::List { role, section } => {
                let filter = UserFilter {
                    role,
                    section_id: section,
                };
                let outcome = store.fetch_list(&filter).await;
                ensure(store, outcome)?;
                let state = store.snapshot();
                emit_list(out, ctx, state.collection(), render::user_line)
            }
        }
    }
}
