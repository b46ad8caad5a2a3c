//! Shared fixtures for catalog integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use movies_common::catalog::MovieCatalog;
use movies_common::config::DatabaseConfig;
use movies_common::db::models::MediaType;
use movies_common::db::{schema, DbPool, NewFilmwork, NewGenre, NewPerson, Repository};
use uuid::Uuid;

pub struct Fixture {
    pub pool: DbPool,
    pub repo: Repository,
    pub catalog: MovieCatalog,
}

impl Fixture {
    /// Fresh in-memory SQLite catalog with the schema installed
    pub async fn sqlite() -> Self {
        let mut config = DatabaseConfig::with_url("sqlite::memory:");
        config.max_connections = 1;
        config.min_connections = 1;

        Self::connect(&config).await
    }

    /// Connect with `config` and install the schema
    pub async fn connect(config: &DatabaseConfig) -> Self {
        let pool = DbPool::new(config).await.unwrap();
        schema::install(pool.write()).await.unwrap();

        Self {
            repo: Repository::new(pool.clone()),
            catalog: MovieCatalog::new(pool.clone()),
            pool,
        }
    }

    pub async fn filmwork(&self, title: &str) -> Uuid {
        self.repo
            .create_filmwork(NewFilmwork {
                title: title.to_string(),
                description: format!("About {}", title),
                creation_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
                rating: 8.7,
                media_type: MediaType::Movie,
            })
            .await
            .unwrap()
            .id
    }

    pub async fn genre(&self, name: &str) -> Uuid {
        self.repo
            .create_genre(NewGenre { name: name.to_string(), description: String::new() })
            .await
            .unwrap()
            .id
    }

    pub async fn person(&self, full_name: &str) -> Uuid {
        self.repo
            .create_person(NewPerson { full_name: full_name.to_string() })
            .await
            .unwrap()
            .id
    }
}
