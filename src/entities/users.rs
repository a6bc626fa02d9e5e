use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub first_name: String,

    pub last_name: String,

    /// Stored case-sensitively; uniqueness is enforced at the column level.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash (PHC string)
    pub password_hash: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_widgets::Entity")]
    UserWidgets,
}

impl Related<super::user_widgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserWidgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
