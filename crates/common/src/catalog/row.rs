//! Wire shapes of the list and detail responses

use crate::catalog::pagination::Page;
use crate::db::models::MediaType;
use chrono::NaiveDate;
use sea_orm::{DbErr, FromQueryResult, QueryResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One filmwork with its aggregated genre and person names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmworkRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub creation_date: NaiveDate,
    pub rating: f64,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
}

impl FromQueryResult for FilmworkRow {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            id: res.try_get(pre, "id")?,
            title: res.try_get(pre, "title")?,
            description: res.try_get(pre, "description")?,
            creation_date: res.try_get(pre, "creation_date")?,
            rating: res.try_get(pre, "rating")?,
            media_type: res.try_get(pre, "type")?,
            genres: names(res, pre, "genres")?,
            actors: names(res, pre, "actors")?,
            directors: names(res, pre, "directors")?,
            writers: names(res, pre, "writers")?,
        })
    }
}

/// Decode a JSON array aggregate into a sorted, duplicate-free name list
fn names(res: &QueryResult, pre: &str, column: &str) -> Result<Vec<String>, DbErr> {
    let raw: Option<String> = res.try_get(pre, column)?;
    let mut names: Vec<String> = match raw {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| DbErr::Type(format!("column {} is not a JSON name array: {}", column, e)))?,
        None => Vec::new(),
    };
    names.sort();
    names.dedup();
    Ok(names)
}

/// `SELECT COUNT(*) AS count` result
#[derive(Debug, FromQueryResult)]
pub(crate) struct CountRow {
    pub count: i64,
}

/// Paginated list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviesPage {
    pub count: u64,
    pub prev: Option<u64>,
    pub next: Option<u64>,
    pub total_pages: u64,
    pub results: Vec<FilmworkRow>,
}

impl MoviesPage {
    pub fn new(page: &Page, results: Vec<FilmworkRow>) -> Self {
        Self {
            count: page.count,
            prev: page.previous(),
            next: page.next(),
            total_pages: page.num_pages,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::pagination::{PageRequest, Paginator};
    use serde_json::json;

    fn row() -> FilmworkRow {
        FilmworkRow {
            id: Uuid::parse_str("3d825f60-9fff-4dfe-b294-1a45fa1e115d").unwrap(),
            title: "Star Wars: Episode IV - A New Hope".into(),
            description: String::new(),
            creation_date: NaiveDate::from_ymd_opt(1977, 5, 25).unwrap(),
            rating: 8.6,
            media_type: MediaType::Movie,
            genres: vec!["Action".into(), "Adventure".into()],
            actors: vec!["Mark Hamill".into()],
            directors: vec![],
            writers: vec!["George Lucas".into()],
        }
    }

    #[test]
    fn test_row_wire_format() {
        let value = serde_json::to_value(row()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "3d825f60-9fff-4dfe-b294-1a45fa1e115d",
                "title": "Star Wars: Episode IV - A New Hope",
                "description": "",
                "creation_date": "1977-05-25",
                "rating": 8.6,
                "type": "movie",
                "genres": ["Action", "Adventure"],
                "actors": ["Mark Hamill"],
                "directors": [],
                "writers": ["George Lucas"]
            })
        );
    }

    #[test]
    fn test_tv_show_code() {
        let mut show = row();
        show.media_type = MediaType::TvShow;
        assert_eq!(serde_json::to_value(show).unwrap()["type"], "tv_show");
    }

    #[test]
    fn test_page_envelope_nulls() {
        let page = Paginator::new(1, 50).page(PageRequest::default()).unwrap();
        let value = serde_json::to_value(MoviesPage::new(&page, vec![row()])).unwrap();

        assert_eq!(value["count"], 1);
        assert!(value["prev"].is_null());
        assert!(value["next"].is_null());
        assert_eq!(value["total_pages"], 1);
        assert_eq!(value["results"].as_array().unwrap().len(), 1);
    }
}
