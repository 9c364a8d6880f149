/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_table_user;
mod m20260105_000002_create_table_classlist;
mod m20260105_000003_create_table_pending_registration;
mod m20260105_000004_create_table_project;
mod m20260105_000005_create_table_comment;
mod m20260105_000006_create_table_notification;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_table_user::Migration),
            Box::new(m20260105_000002_create_table_classlist::Migration),
            Box::new(m20260105_000003_create_table_pending_registration::Migration),
            Box::new(m20260105_000004_create_table_project::Migration),
            Box::new(m20260105_000005_create_table_comment::Migration),
            Box::new(m20260105_000006_create_table_notification::Migration),
        ]
    }
}
