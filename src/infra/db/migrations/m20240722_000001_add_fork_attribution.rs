//! Migration: Track the original author of forked levels.
//!
//! Adds `original_user_id` to levels. Null for levels that were authored
//! from scratch; set once at fork time and never rewritten afterwards.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Levels::Table)
                    .add_column(ColumnDef::new(Levels::OriginalUserId).uuid().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_levels_original_user")
                    .from(Levels::Table, Levels::OriginalUserId)
                    .to(Users::Table, Users::Id)
                    .to_owned(),
            )
            .await?;

        // Profiles query levels by original author as well as owner
        manager
            .create_index(
                Index::create()
                    .name("idx_levels_original_user_id")
                    .table(Levels::Table)
                    .col(Levels::OriginalUserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_levels_original_user_id")
                    .table(Levels::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name("fk_levels_original_user")
                    .table(Levels::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Levels::Table)
                    .drop_column(Levels::OriginalUserId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Levels {
    Table,
    OriginalUserId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
