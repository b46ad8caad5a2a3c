//! Repository for catalog write operations
//!
//! The HTTP surface is read-only; these are the primitives an import tool or
//! an administrative backend uses to maintain the catalog. Inputs are
//! validated before anything reaches the database.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::Result;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Input for a new genre
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewGenre {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

/// Input for a new person
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPerson {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
}

/// Input for a new filmwork
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewFilmwork {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub creation_date: NaiveDate,

    #[validate(range(min = 0.0, max = 100.0))]
    pub rating: f64,

    #[serde(default, rename = "type")]
    pub media_type: MediaType,
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    // ========================================================================
    // Genre Operations
    // ========================================================================

    /// Create a new genre
    pub async fn create_genre(&self, input: NewGenre) -> Result<Genre> {
        input.validate()?;
        let now = chrono::Utc::now();

        let genre = GenreActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        genre.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete genre by ID, dropping its filmwork links
    pub async fn delete_genre(&self, id: Uuid) -> Result<bool> {
        let result = GenreEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Person Operations
    // ========================================================================

    /// Create a new person
    pub async fn create_person(&self, input: NewPerson) -> Result<Person> {
        input.validate()?;
        let now = chrono::Utc::now();

        let person = PersonActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(input.full_name),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        person.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete person by ID, dropping their filmwork links
    pub async fn delete_person(&self, id: Uuid) -> Result<bool> {
        let result = PersonEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Filmwork Operations
    // ========================================================================

    /// Create a new filmwork
    pub async fn create_filmwork(&self, input: NewFilmwork) -> Result<Filmwork> {
        input.validate()?;
        let now = chrono::Utc::now();

        let filmwork = FilmworkActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            description: Set(input.description),
            creation_date: Set(input.creation_date),
            rating: Set(input.rating),
            media_type: Set(input.media_type),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let filmwork = filmwork.insert(self.write_conn()).await?;

        tracing::info!(
            filmwork_id = %filmwork.id,
            title = %filmwork.title,
            "Filmwork created"
        );

        Ok(filmwork)
    }

    /// Delete filmwork by ID, dropping its genre and person links
    pub async fn delete_filmwork(&self, id: Uuid) -> Result<bool> {
        let result = FilmworkEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Attach a genre to a filmwork; each pair may be linked once
    pub async fn add_genre_to_filmwork(
        &self,
        film_work_id: Uuid,
        genre_id: Uuid,
    ) -> Result<GenreFilmwork> {
        let link = GenreFilmworkActiveModel {
            id: Set(Uuid::new_v4()),
            film_work_id: Set(film_work_id),
            genre_id: Set(genre_id),
            created_at: Set(chrono::Utc::now().into()),
        };

        link.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Attach a person to a filmwork under a role; the same person may hold
    /// several roles on one filmwork, but each role only once
    pub async fn add_person_to_filmwork(
        &self,
        film_work_id: Uuid,
        person_id: Uuid,
        role: PersonRole,
    ) -> Result<PersonFilmwork> {
        let link = PersonFilmworkActiveModel {
            id: Set(Uuid::new_v4()),
            film_work_id: Set(film_work_id),
            person_id: Set(person_id),
            role: Set(role),
            created_at: Set(chrono::Utc::now().into()),
        };

        link.insert(self.write_conn()).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filmwork(rating: f64) -> NewFilmwork {
        NewFilmwork {
            title: "Alien".into(),
            description: String::new(),
            creation_date: NaiveDate::from_ymd_opt(1979, 5, 25).unwrap(),
            rating,
            media_type: MediaType::Movie,
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(filmwork(0.0).validate().is_ok());
        assert!(filmwork(100.0).validate().is_ok());
        assert!(filmwork(-0.5).validate().is_err());
        assert!(filmwork(100.1).validate().is_err());
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(NewPerson { full_name: String::new() }.validate().is_err());
        assert!(NewGenre { name: "x".repeat(256), description: String::new() }.validate().is_err());
    }

    #[test]
    fn test_filmwork_input_defaults() {
        let input: NewFilmwork = serde_json::from_str(
            r#"{"title": "Dune", "creation_date": "2021-10-22", "rating": 80.0}"#,
        )
        .unwrap();

        assert_eq!(input.media_type, MediaType::Movie);
        assert!(input.description.is_empty());
    }
}
