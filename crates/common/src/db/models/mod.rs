//! SeaORM entity models
//!
//! Catalog entities: genres, persons, filmworks and their join tables

mod genre;
mod person;
mod filmwork;
mod genre_filmwork;
mod person_filmwork;

pub use genre::{
    Entity as GenreEntity,
    Model as Genre,
    ActiveModel as GenreActiveModel,
    Column as GenreColumn,
};

pub use person::{
    Entity as PersonEntity,
    Model as Person,
    ActiveModel as PersonActiveModel,
    Column as PersonColumn,
};

pub use filmwork::{
    Entity as FilmworkEntity,
    Model as Filmwork,
    ActiveModel as FilmworkActiveModel,
    Column as FilmworkColumn,
    MediaType,
};

pub use genre_filmwork::{
    Entity as GenreFilmworkEntity,
    Model as GenreFilmwork,
    ActiveModel as GenreFilmworkActiveModel,
    Column as GenreFilmworkColumn,
};

pub use person_filmwork::{
    Entity as PersonFilmworkEntity,
    Model as PersonFilmwork,
    ActiveModel as PersonFilmworkActiveModel,
    Column as PersonFilmworkColumn,
    PersonRole,
};
