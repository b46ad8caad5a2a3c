//! Catalog reads: the paginated list and the single-filmwork detail

use crate::catalog::pagination::{PageRequest, Paginator};
use crate::catalog::query::{FilmworkFilter, FilmworkQuery};
use crate::catalog::row::{CountRow, FilmworkRow, MoviesPage};
use crate::catalog::PAGE_SIZE;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use crate::metrics;
use sea_orm::{
    AccessMode, DatabaseTransaction, DbBackend, FromQueryResult, IsolationLevel, TransactionTrait,
};
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// Read-only access to the aggregated catalog
#[derive(Clone)]
pub struct MovieCatalog {
    db: DbPool,
}

impl MovieCatalog {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// One page of filmworks, optionally restricted to titles containing
    /// `title` (case-insensitive)
    pub async fn list(&self, title: Option<&str>, request: PageRequest) -> Result<MoviesPage> {
        let start = Instant::now();
        let query = FilmworkQuery::new(self.db.backend(), FilmworkFilter::title(title))?;

        // Count and slice must see the same snapshot
        let txn = self.begin_read().await?;

        let count = CountRow::find_by_statement(query.count())
            .one(&txn)
            .await?
            .map(|row| u64::try_from(row.count).unwrap_or(0))
            .unwrap_or(0);

        let page = Paginator::new(count, PAGE_SIZE).page(request)?;

        let results = FilmworkRow::find_by_statement(query.rows(Some(&page)))
            .all(&txn)
            .await?;

        txn.commit().await?;

        metrics::record_catalog_query("list", start.elapsed().as_secs_f64(), results.len());
        debug!(
            filter = ?query.filter(),
            count,
            page = page.number,
            rows = results.len(),
            "Catalog page served"
        );

        Ok(MoviesPage::new(&page, results))
    }

    /// The aggregated record of one filmwork
    pub async fn detail(&self, id: Uuid) -> Result<FilmworkRow> {
        let start = Instant::now();
        let query = FilmworkQuery::new(self.db.backend(), FilmworkFilter::Id(id))?;

        let row = FilmworkRow::find_by_statement(query.rows(None))
            .one(self.db.read())
            .await?;

        metrics::record_catalog_query(
            "detail",
            start.elapsed().as_secs_f64(),
            usize::from(row.is_some()),
        );

        row.ok_or_else(|| AppError::FilmworkNotFound { id: id.to_string() })
    }

    async fn begin_read(&self) -> Result<DatabaseTransaction> {
        let conn = self.db.read();
        let txn = match self.db.backend() {
            DbBackend::Postgres => {
                conn.begin_with_config(
                    Some(IsolationLevel::RepeatableRead),
                    Some(AccessMode::ReadOnly),
                )
                .await?
            }
            _ => conn.begin().await?,
        };
        Ok(txn)
    }
}
