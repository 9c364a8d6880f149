/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use chrono::Utc;
use entity::user::Role;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection, EntityTrait, QueryFilter,
};
use std::time::Duration;
use tracing::info;
use tracing::log::LevelFilter;
use uuid::Uuid;

use super::input::{load_secret, validate_matricule, validate_password};
use super::types::*;

pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let db_url = if let Some(file) = &cli.database_url_file {
        load_secret(file)
    } else if let Some(url) = &cli.database_url {
        url.clone()
    } else {
        anyhow::bail!("No database url provided")
    };

    if db_url.is_empty() {
        anyhow::bail!("Database url is empty");
    }

    let mut opt = ConnectOptions::new(db_url);

    // Only enable SQL logging at debug level
    if cli.log_level == "debug" {
        opt.sqlx_logging(true).sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8));

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    seed_admin(&db, cli).await?;
    Ok(db)
}

/// Creates the configured administrator account when it does not exist yet. An
/// existing account with that matricule is left untouched.
pub async fn seed_admin<C: ConnectionTrait>(db: &C, cli: &Cli) -> Result<Option<MUser>> {
    let (Some(matricule), Some(password_file)) =
        (&cli.admin_matricule, &cli.admin_password_file)
    else {
        return Ok(None);
    };

    validate_matricule(matricule).map_err(anyhow::Error::msg)?;

    let existing = EUser::find()
        .filter(CUser::Matricule.eq(matricule.as_str()))
        .one(db)
        .await
        .context("Failed to query administrator")?;

    if existing.is_some() {
        return Ok(None);
    }

    let password = load_secret(password_file);
    validate_password(&password)
        .map_err(anyhow::Error::msg)
        .context("Invalid administrator password")?;

    let auser = AUser {
        id: Set(Uuid::new_v4()),
        matricule: Set(matricule.clone()),
        name: Set(cli.admin_name.clone()),
        email: Set(None),
        password: Set(password_auth::generate_hash(password)),
        role: Set(Role::Admin),
        last_login_at: Set(None),
        created_at: Set(Utc::now().naive_utc()),
    };

    let admin = auser
        .insert(db)
        .await
        .context("Failed to create administrator")?;

    info!(matricule = %admin.matricule, "Seeded administrator account");
    Ok(Some(admin))
}
