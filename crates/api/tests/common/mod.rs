//! Shared helpers for API integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use movies_api::{create_router, AppState};
use movies_common::config::{AppConfig, DatabaseConfig};
use movies_common::db::models::{MediaType, PersonRole};
use movies_common::db::{schema, DbPool, NewFilmwork, NewGenre, NewPerson, Repository};
use tower::ServiceExt;
use uuid::Uuid;

/// A router over a fresh in-memory catalog, plus a repository for seeding
pub struct TestApp {
    pub router: Router,
    pub repo: Repository,
}

/// Build the full application router, middleware included, over SQLite
pub async fn build_test_app() -> TestApp {
    let mut database = DatabaseConfig::with_url("sqlite::memory:");
    database.max_connections = 1;
    database.min_connections = 1;

    let config = AppConfig {
        database,
        ..AppConfig::default()
    };

    let db = DbPool::new(&config.database).await.unwrap();
    schema::install(db.write()).await.unwrap();

    TestApp {
        repo: Repository::new(db.clone()),
        router: create_router(AppState::new(config, db)),
    }
}

impl TestApp {
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

    pub async fn genre(&self, film: Uuid, name: &str) {
        let genre = self
            .repo
            .create_genre(NewGenre { name: name.to_string(), description: String::new() })
            .await
            .unwrap();
        self.repo.add_genre_to_filmwork(film, genre.id).await.unwrap();
    }

    pub async fn person(&self, film: Uuid, full_name: &str, role: PersonRole) {
        let person = self
            .repo
            .create_person(NewPerson { full_name: full_name.to_string() })
            .await
            .unwrap();
        self.repo.add_person_to_filmwork(film, person.id, role).await.unwrap();
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Method::GET, uri).await
    }

    pub async fn request(&self, method: Method, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

/// Collect a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
