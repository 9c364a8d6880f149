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
                    .table(Classlist::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Classlist::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Classlist::Matricule)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Classlist::Name).string().not_null())
                    .col(
                        ColumnDef::new(Classlist::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Classlist::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Classlist {
    Table,
    Id,
    Matricule,
    Name,
    Email,
}
