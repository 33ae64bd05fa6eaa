//! Collection database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Collection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "collections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub author_note: Option<String>,
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
    #[sea_orm(has_many = "super::collection_level::Entity")]
    CollectionLevel,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::collection_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CollectionLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Collection {
    fn from(model: Model) -> Self {
        Collection {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            author_note: model.author_note,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
