//! Migration: Create the core schema.
//!
//! Tables: users, collections, levels, reviews, collection_levels.
//! Relation columns hold identifiers only; joins happen at read time.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Roles).string().not_null())
                    .col(
                        ColumnDef::new(Users::Score)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::Official)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Collections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Collections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Collections::UserId).uuid().not_null())
                    .col(ColumnDef::new(Collections::Name).string().not_null())
                    .col(ColumnDef::new(Collections::AuthorNote).text().null())
                    .col(
                        ColumnDef::new(Collections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Collections::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collections_user")
                            .from(Collections::Table, Collections::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Levels::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Levels::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Levels::UserId).uuid().not_null())
                    .col(ColumnDef::new(Levels::PackId).uuid().null())
                    .col(ColumnDef::new(Levels::Name).string().not_null())
                    .col(ColumnDef::new(Levels::Width).integer().not_null())
                    .col(ColumnDef::new(Levels::Height).integer().not_null())
                    .col(
                        ColumnDef::new(Levels::LeastMoves)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Levels::IsDraft)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Levels::Data).text().not_null())
                    .col(
                        ColumnDef::new(Levels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Levels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_levels_user")
                            .from(Levels::Table, Levels::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_levels_pack")
                            .from(Levels::Table, Levels::PackId)
                            .to(Collections::Table, Collections::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_levels_user_id")
                    .table(Levels::Table)
                    .col(Levels::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::UserId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::LevelId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::Score).small_integer().not_null())
                    .col(ColumnDef::new(Reviews::Text).text().null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_user")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_level")
                            .from(Reviews::Table, Reviews::LevelId)
                            .to(Levels::Table, Levels::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One review per (user, level) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_user_level")
                    .table(Reviews::Table)
                    .col(Reviews::UserId)
                    .col(Reviews::LevelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // The latest-reviews feed scans by recency
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_created_at")
                    .table(Reviews::Table)
                    .col(Reviews::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollectionLevels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectionLevels::CollectionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CollectionLevels::LevelId).uuid().not_null())
                    .col(
                        ColumnDef::new(CollectionLevels::Position)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CollectionLevels::CollectionId)
                            .col(CollectionLevels::LevelId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_levels_collection")
                            .from(CollectionLevels::Table, CollectionLevels::CollectionId)
                            .to(Collections::Table, Collections::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_levels_level")
                            .from(CollectionLevels::Table, CollectionLevels::LevelId)
                            .to(Levels::Table, Levels::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CollectionLevels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Levels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Collections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Roles,
    Score,
    Official,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Collections {
    Table,
    Id,
    UserId,
    Name,
    AuthorNote,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Levels {
    Table,
    Id,
    UserId,
    PackId,
    Name,
    Width,
    Height,
    LeastMoves,
    IsDraft,
    Data,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    UserId,
    LevelId,
    Score,
    Text,
    CreatedAt,
}

#[derive(Iden)]
enum CollectionLevels {
    Table,
    CollectionId,
    LevelId,
    Position,
}
