// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use sh_cli::{Cli, Parser};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    sh_cli::run(cli, &mut stdout).await
}
