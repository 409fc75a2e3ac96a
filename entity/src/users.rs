use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub username: String,
    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub email: String,
    #[sea_orm(column_type = "String(StringLen::N(512))")]
    pub password_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::memos::Entity")]
    Memos,
}

impl Related<super::memos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
