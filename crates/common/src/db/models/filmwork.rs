//! Filmwork entity: a movie or a TV show

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of filmwork, stored as its string code
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    #[sea_orm(string_value = "movie")]
    Movie,
    #[sea_orm(string_value = "tv_show")]
    TvShow,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "film_work")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub creation_date: Date,

    /// Always within [0, 100]; enforced on the write path
    pub rating: f64,

    #[sea_orm(column_name = "type")]
    pub media_type: MediaType,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::genre_filmwork::Entity")]
    GenreFilmworks,

    #[sea_orm(has_many = "super::person_filmwork::Entity")]
    PersonFilmworks,
}

impl Related<super::genre_filmwork::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GenreFilmworks.def()
    }
}

impl Related<super::person_filmwork::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonFilmworks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
