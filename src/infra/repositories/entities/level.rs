//! Level database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Level;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "levels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: Uuid,
    /// Original author when the level was forked (NULL = not a fork)
    pub original_user_id: Option<Uuid>,
    pub pack_id: Option<Uuid>,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub least_moves: i32,
    pub is_draft: bool,
    #[sea_orm(column_type = "Text")]
    pub data: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::collection::Entity",
        from = "Column::PackId",
        to = "super::collection::Column::Id"
    )]
    Pack,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::collection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pack.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Level {
    fn from(model: Model) -> Self {
        Level {
            id: model.id,
            user_id: model.user_id,
            original_user_id: model.original_user_id,
            pack_id: model.pack_id,
            name: model.name,
            width: model.width,
            height: model.height,
            least_moves: model.least_moves,
            is_draft: model.is_draft,
            data: model.data,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
