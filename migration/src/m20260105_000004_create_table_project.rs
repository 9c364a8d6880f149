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
                    .table(Project::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Project::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Project::Title).string().not_null())
                    .col(ColumnDef::new(Project::Abstract).text().not_null())
                    .col(ColumnDef::new(Project::Student).uuid().not_null())
                    .col(ColumnDef::new(Project::Supervisor).uuid().null())
                    .col(ColumnDef::new(Project::Status).small_integer().not_null())
                    .col(ColumnDef::new(Project::DraftFile).string().not_null())
                    .col(ColumnDef::new(Project::FinalFile).string().null())
                    .col(
                        ColumnDef::new(Project::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Project::DownloadCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Project::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Project::UpdatedAt).date_time().not_null())
                    .col(ColumnDef::new(Project::PublishedAt).date_time().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-project-student")
                            .from(Project::Table, Project::Student)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-project-supervisor")
                            .from(Project::Table, Project::Supervisor)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-project-status")
                    .table(Project::Table)
                    .col(Project::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Project {
    Table,
    Id,
    Title,
    Abstract,
    Student,
    Supervisor,
    Status,
    DraftFile,
    FinalFile,
    ViewCount,
    DownloadCount,
    CreatedAt,
    UpdatedAt,
    PublishedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
