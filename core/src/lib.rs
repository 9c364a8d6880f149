/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod accounts;
pub mod consts;
pub mod database;
pub mod email;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod navigation;
pub mod notifications;
pub mod projects;
pub mod registration;
pub mod repository;
pub mod storage;
pub mod types;

use anyhow::{Context, Result};
use database::connect_db;
use email::create_mailer;
use input::load_secret;
use std::sync::Arc;
use storage::LocalFileStore;
use tracing::info;
use types::*;

pub async fn init_state(cli: Cli) -> Result<Arc<ServerState>> {
    info!("Starting Scholar Server on {}:{}", cli.ip, cli.port);

    if load_secret(&cli.jwt_secret_file).is_empty() {
        anyhow::bail!("JWT secret file is missing or empty");
    }

    let db = connect_db(&cli).await?;
    let mailer = create_mailer(&cli)
        .await
        .context("Failed to initialize email service")?;
    let storage = Arc::new(LocalFileStore::new(&cli.base_path, &cli.files_base_url()).await?);

    Ok(Arc::new(ServerState {
        db,
        cli,
        mailer,
        storage,
    }))
}
