/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PendingRegistration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PendingRegistration::Matricule)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PendingRegistration::Name).string().not_null())
                    .col(
                        ColumnDef::new(PendingRegistration::Password)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PendingRegistration::Otp).string().not_null())
                    .col(
                        ColumnDef::new(PendingRegistration::ExpiresAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PendingRegistration::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PendingRegistration::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PendingRegistration {
    Table,
    Matricule,
    Name,
    Password,
    Otp,
    ExpiresAt,
    CreatedAt,
}
