//! Person <-> filmwork join entity carrying the person's role

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role a person holds on a filmwork
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    #[sea_orm(string_value = "director")]
    Director,
    #[sea_orm(string_value = "writer")]
    Writer,
    #[default]
    #[sea_orm(string_value = "actor")]
    Actor,
}

impl PersonRole {
    /// Stored string code
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonRole::Director => "director",
            PersonRole::Writer => "writer",
            PersonRole::Actor => "actor",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person_film_work")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub film_work_id: Uuid,

    pub person_id: Uuid,

    pub role: PersonRole,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::filmwork::Entity",
        from = "Column::FilmWorkId",
        to = "super::filmwork::Column::Id",
        on_delete = "Cascade"
    )]
    Filmwork,

    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id",
        on_delete = "Cascade"
    )]
    Person,
}

impl Related<super::filmwork::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Filmwork.def()
    }
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
