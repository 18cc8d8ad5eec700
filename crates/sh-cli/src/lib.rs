// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! schoolhub command-line client

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Subcommand;
use sh_client_api::ClientApi;
use sh_logging::{CliLoggingArgs, redact};
use sh_rest_client::RestClient;
use sh_rest_mock_client::MockSchoolBackend;
use sh_store::AppStore;
use tracing::{debug, info};

pub mod commands;
pub mod config;
pub mod render;

pub use clap::Parser;

use commands::announcements::AnnouncementCommands;
use commands::dashboard::DashboardArgs;
use commands::messages::MessageCommands;
use commands::schedule::ScheduleCommands;
use commands::users::UserCommands;
use config::{ConfigOverrides, SchoolhubConfig};

#[derive(clap::Parser, Debug)]
#[command(
    name = "schoolhub",
    about = "School portal client: announcements, messages, schedules and dashboards",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file (default: <config dir>/schoolhub/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Backend base URL, overrides `service-base-url`
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Bearer token, overrides `auth-token`
    #[arg(long, global = true)]
    pub token: Option<String>,
    /// Use the built-in demo backend instead of the network
    #[arg(long, global = true)]
    pub mock: bool,
    /// Act as this user id (dashboard scope; identity on the demo backend)
    #[arg(long = "as", value_name = "USER_ID", global = true)]
    pub viewer: Option<String>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    #[command(flatten)]
    pub logging: CliLoggingArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// School-wide announcements
    Announcements {
        #[command(subcommand)]
        command: AnnouncementCommands,
    },
    /// Direct messages
    Messages {
        #[command(subcommand)]
        command: MessageCommands,
    },
    /// Class schedules
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// User directory
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Role dashboard figures
    Dashboard(DashboardArgs),
    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the merged configuration as TOML
    Show,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
        }
    }
}

/// Transport for the session: the demo backend or the REST client
pub fn build_api(
    config: &SchoolhubConfig,
    mock: bool,
    viewer: Option<&str>,
) -> Result<Arc<dyn ClientApi>> {
    if mock {
        let mut backend = MockSchoolBackend::with_seed_data();
        if let Some(viewer) = viewer {
            backend = backend.with_viewer(viewer);
        }
        info!(viewer = backend.viewer_id(), "using demo backend");
        return Ok(Arc::new(backend));
    }

    let client = RestClient::from_config(&config.network).context("configuring REST client")?;
    info!(
        base_url = %client.base_url(),
        token = config.network.auth_token.as_ref().map(redact),
        "using REST backend"
    );
    Ok(Arc::new(client))
}

/// Run one subcommand against an already constructed store
pub async fn execute(
    command: Commands,
    app: &AppStore,
    ctx: &commands::Context,
    out: &mut dyn Write,
) -> Result<()> {
    debug!(?command, "executing command");
    match command {
        Commands::Announcements { command } => command.run(app, ctx, out).await,
        Commands::Messages { command } => command.run(app, ctx, out).await,
        Commands::Schedule { command } => command.run(app, ctx, out).await,
        Commands::Users { command } => command.run(app, ctx, out).await,
        Commands::Dashboard(args) => args.run(app, ctx, out).await,
        Commands::Config { .. } => anyhow::bail!("config commands do not use the backend"),
    }
}

/// Entry point behind `main`: configuration, logging, transport, command
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = config::load(cli.config.as_deref(), &cli.overrides())?;
    cli.logging.clone().with_fallback(&config.logging).init("schoolhub")?;

    if let Commands::Config { command: ConfigCommands::Show } = &cli.command {
        write!(out, "{}", config.to_redacted_toml()?)?;
        return Ok(());
    }

    let api = build_api(&config, cli.mock, cli.viewer.as_deref())?;
    let app = AppStore::new(api);
    let ctx = commands::Context {
        timetable: config.timetable.clone(),
        json: cli.json,
        viewer_id: cli.viewer.clone(),
    };
    execute(cli.command, &app, &ctx, out).await
}
