//! Schema installation
//!
//! Tables are derived from the entity models; lookup and uniqueness
//! indexes are declared here. Every statement is `IF NOT EXISTS`, so
//! installing twice is a no-op.

use crate::db::models::*;
use crate::errors::Result;
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, Schema};
use tracing::info;

/// Create all catalog tables and indexes
pub async fn install<C: ConnectionTrait>(conn: &C) -> Result<()> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    // Parents before join tables so foreign keys resolve
    let mut tables = vec![
        schema.create_table_from_entity(GenreEntity),
        schema.create_table_from_entity(PersonEntity),
        schema.create_table_from_entity(FilmworkEntity),
        schema.create_table_from_entity(GenreFilmworkEntity),
        schema.create_table_from_entity(PersonFilmworkEntity),
    ];

    for table in tables.iter_mut() {
        table.if_not_exists();
        conn.execute(backend.build(&*table)).await?;
    }

    for index in indexes() {
        conn.execute(backend.build(&index)).await?;
    }

    info!("Catalog schema installed");
    Ok(())
}

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .if_not_exists()
            .name("person_full_name_idx")
            .table(PersonEntity)
            .col(PersonColumn::FullName)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("film_work_title_idx")
            .table(FilmworkEntity)
            .col(FilmworkColumn::Title)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("film_work_creation_date_idx")
            .table(FilmworkEntity)
            .col(FilmworkColumn::CreationDate)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("film_work_rating_idx")
            .table(FilmworkEntity)
            .col(FilmworkColumn::Rating)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("film_work_type_idx")
            .table(FilmworkEntity)
            .col(FilmworkColumn::MediaType)
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("genre_film_work_idx_fk")
            .table(GenreFilmworkEntity)
            .col(GenreFilmworkColumn::FilmWorkId)
            .col(GenreFilmworkColumn::GenreId)
            .unique()
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("person_role_film_work_idx_fk")
            .table(PersonFilmworkEntity)
            .col(PersonFilmworkColumn::FilmWorkId)
            .col(PersonFilmworkColumn::PersonId)
            .col(PersonFilmworkColumn::Role)
            .unique()
            .to_owned(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbBackend;

    #[test]
    fn test_unique_indexes_cover_join_keys() {
        let sql: Vec<String> = indexes()
            .iter()
            .map(|index| DbBackend::Postgres.build(index).to_string())
            .collect();

        assert!(sql.iter().any(|s| s.contains("CREATE UNIQUE INDEX")
            && s.contains("\"genre_film_work\" (\"film_work_id\", \"genre_id\")")));
        assert!(sql.iter().any(|s| s.contains("CREATE UNIQUE INDEX")
            && s.contains("\"person_film_work\" (\"film_work_id\", \"person_id\", \"role\")")));
        assert!(sql.iter().any(|s| s.contains("\"film_work\" (\"type\")")));
    }
}
