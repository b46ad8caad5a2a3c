//! Person entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub full_name: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::person_filmwork::Entity")]
    PersonFilmworks,
}

impl Related<super::person_filmwork::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonFilmworks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
