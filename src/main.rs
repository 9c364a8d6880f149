/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use clap::Parser;
use scholar_core::init_state;
use scholar_core::types::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let _guard = match (&cli.sentry_dsn, cli.report_errors) {
        (Some(dsn), true) => Some(sentry::init(dsn.as_str())),
        _ => None,
    };

    let state = init_state(cli).await?;
    web::serve_web(state).await?;

    Ok(())
}
