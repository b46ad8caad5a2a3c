//! Aggregation query builder
//!
//! Produces one statement that returns a single flattened row per filmwork:
//! the filmwork's own columns plus the distinct genre names and the distinct
//! person names for each role. Filmworks are windowed in a subquery before
//! the joins, so pagination never multiplies rows, and every join is a LEFT
//! JOIN so filmworks without genres or persons are still returned.
//!
//! Aggregates come back as JSON array text on every backend and are decoded
//! in [`super::row`]. Filtered-out and absent names aggregate to `[]`, never
//! NULL.

use crate::catalog::pagination::Page;
use crate::db::models::PersonRole;
use crate::errors::{AppError, Result};
use sea_orm::{DbBackend, Statement, Value};
use uuid::Uuid;

/// Which filmworks a query covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilmworkFilter {
    All,
    /// Case-insensitive substring match on the title
    TitleContains(String),
    Id(Uuid),
}

impl FilmworkFilter {
    /// Filter for the optional `title` parameter; blank means no filter
    pub fn title(title: Option<&str>) -> Self {
        match title {
            Some(t) if !t.is_empty() => FilmworkFilter::TitleContains(t.to_string()),
            _ => FilmworkFilter::All,
        }
    }
}

/// Builds the count and aggregation statements for one filter
#[derive(Debug, Clone)]
pub struct FilmworkQuery {
    backend: DbBackend,
    filter: FilmworkFilter,
}

const FILMWORK_COLUMNS: &str = r#"f.id, f.title, f.description, f.creation_date, f.rating, f."type""#;

impl FilmworkQuery {
    pub fn new(backend: DbBackend, filter: FilmworkFilter) -> Result<Self> {
        match backend {
            DbBackend::Postgres | DbBackend::Sqlite => Ok(Self { backend, filter }),
            other => Err(AppError::Configuration {
                message: format!("Catalog queries are not supported on {:?}", other),
            }),
        }
    }

    pub fn filter(&self) -> &FilmworkFilter {
        &self.filter
    }

    /// `SELECT COUNT(*) AS count` over the filtered filmworks
    pub fn count(&self) -> Statement {
        let (condition, values) = self.condition();
        let sql = format!("SELECT COUNT(*) AS count FROM film_work f {}", condition);
        Statement::from_sql_and_values(self.backend, sql, values)
    }

    /// One aggregated row per filtered filmwork, ordered by title then id,
    /// restricted to `page` when given
    pub fn rows(&self, page: Option<&Page>) -> Statement {
        let (condition, values) = self.condition();
        let window = page
            .map(|p| format!("LIMIT {} OFFSET {}", p.limit(), p.offset()))
            .unwrap_or_default();

        let sql = format!(
            r#"
            SELECT
                fw.id, fw.title, fw.description, fw.creation_date, fw.rating, fw."type",
                {genres} AS genres,
                {actors} AS actors,
                {directors} AS directors,
                {writers} AS writers
            FROM (
                SELECT {columns}
                FROM film_work f
                {condition}
                ORDER BY f.title, f.id
                {window}
            ) fw
            LEFT JOIN genre_film_work gfw ON gfw.film_work_id = fw.id
            LEFT JOIN genre g ON g.id = gfw.genre_id
            LEFT JOIN person_film_work pfw ON pfw.film_work_id = fw.id
            LEFT JOIN person p ON p.id = pfw.person_id
            GROUP BY fw.id, fw.title, fw.description, fw.creation_date, fw.rating, fw."type"
            ORDER BY fw.title, fw.id
            "#,
            genres = self.distinct_names("g.name", "g.name IS NOT NULL"),
            actors = self.role_names(PersonRole::Actor),
            directors = self.role_names(PersonRole::Director),
            writers = self.role_names(PersonRole::Writer),
            columns = FILMWORK_COLUMNS,
            condition = condition,
            window = window,
        );

        Statement::from_sql_and_values(self.backend, sql, values)
    }

    fn role_names(&self, role: PersonRole) -> String {
        let condition = format!("pfw.role = '{}' AND p.full_name IS NOT NULL", role.as_str());
        self.distinct_names("p.full_name", &condition)
    }

    fn distinct_names(&self, column: &str, condition: &str) -> String {
        match self.backend {
            DbBackend::Postgres => format!(
                "COALESCE(json_agg(DISTINCT {}) FILTER (WHERE {}), '[]')::text",
                column, condition
            ),
            _ => format!(
                "COALESCE(json_group_array(DISTINCT {}) FILTER (WHERE {}), '[]')",
                column, condition
            ),
        }
    }

    fn condition(&self) -> (String, Vec<Value>) {
        let param = match self.backend {
            DbBackend::Postgres => "$1",
            _ => "?",
        };

        match &self.filter {
            FilmworkFilter::All => (String::new(), Vec::new()),
            FilmworkFilter::TitleContains(title) => {
                let op = match self.backend {
                    DbBackend::Postgres => "ILIKE",
                    _ => "LIKE",
                };
                (
                    format!(r"WHERE f.title {} {} ESCAPE '\'", op, param),
                    vec![contains_pattern(title).into()],
                )
            }
            FilmworkFilter::Id(id) => (format!("WHERE f.id = {}", param), vec![(*id).into()]),
        }
    }
}

/// `%needle%` with LIKE wildcards in the needle escaped
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::pagination::{PageRequest, Paginator};

    fn values(stmt: &Statement) -> Vec<Value> {
        stmt.values.clone().map(|v| v.0).unwrap_or_default()
    }

    #[test]
    fn test_blank_title_is_no_filter() {
        assert_eq!(FilmworkFilter::title(None), FilmworkFilter::All);
        assert_eq!(FilmworkFilter::title(Some("")), FilmworkFilter::All);
        assert_eq!(
            FilmworkFilter::title(Some("matrix")),
            FilmworkFilter::TitleContains("matrix".into())
        );
    }

    #[test]
    fn test_title_filter_is_case_insensitive_on_postgres() {
        let query = FilmworkQuery::new(
            DbBackend::Postgres,
            FilmworkFilter::TitleContains("matrix".into()),
        )
        .unwrap();

        let count = query.count();
        assert!(count.sql.contains("f.title ILIKE $1"));
        assert_eq!(values(&count), vec![Value::from("%matrix%")]);

        let rows = query.rows(None);
        assert!(rows.sql.contains("f.title ILIKE $1"));
        assert_eq!(values(&rows), vec![Value::from("%matrix%")]);
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        assert_eq!(contains_pattern("100%_off"), r"%100\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn test_rows_use_left_joins_only() {
        let query = FilmworkQuery::new(DbBackend::Postgres, FilmworkFilter::All).unwrap();
        let sql = query.rows(None).sql;

        assert_eq!(sql.matches("LEFT JOIN").count(), 4);
        assert!(!sql.contains("INNER JOIN"));
        assert!(!sql.contains("WHERE f."));
    }

    #[test]
    fn test_each_role_is_aggregated_separately() {
        let query = FilmworkQuery::new(DbBackend::Postgres, FilmworkFilter::All).unwrap();
        let sql = query.rows(None).sql;

        for (role, alias) in [("actor", "actors"), ("director", "directors"), ("writer", "writers")] {
            assert!(sql.contains(&format!(
                "COALESCE(json_agg(DISTINCT p.full_name) FILTER (WHERE pfw.role = '{}' AND p.full_name IS NOT NULL), '[]')::text AS {}",
                role, alias
            )));
        }
        assert!(sql.contains("json_agg(DISTINCT g.name)"));
    }

    #[test]
    fn test_sqlite_dialect() {
        let id = Uuid::new_v4();
        let query = FilmworkQuery::new(DbBackend::Sqlite, FilmworkFilter::Id(id)).unwrap();
        let stmt = query.rows(None);

        assert!(stmt.sql.contains("WHERE f.id = ?"));
        assert!(stmt.sql.contains("json_group_array(DISTINCT g.name)"));
        assert_eq!(values(&stmt), vec![Value::from(id)]);
    }

    #[test]
    fn test_page_window_applies_before_joins() {
        let page = Paginator::new(120, 50).page(PageRequest::Number(3)).unwrap();
        let query = FilmworkQuery::new(DbBackend::Postgres, FilmworkFilter::All).unwrap();
        let sql = query.rows(Some(&page)).sql;

        let window = sql.find("LIMIT 50 OFFSET 100").unwrap();
        let first_join = sql.find("LEFT JOIN").unwrap();
        assert!(window < first_join);
        assert!(sql.contains("ORDER BY f.title, f.id"));
    }

    #[test]
    fn test_unsupported_backend() {
        let err = FilmworkQuery::new(DbBackend::MySql, FilmworkFilter::All).unwrap_err();
        assert!(err.is_server_error());
    }
}
