//! Catalog handlers

use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::Method,
    Json,
};
use movies_common::catalog::{FilmworkRow, MoviesPage, PageRequest};
use movies_common::errors::{AppError, Result};
use serde::Deserialize;
use uuid::Uuid;

/// Query string of `GET /list`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Case-insensitive substring of the title
    pub title: Option<String>,

    /// Page number or `last`; parsed separately so a bad value maps to a
    /// validation error rather than a generic rejection
    pub page: Option<String>,
}

/// List filmworks, 50 per page
pub async fn list_movies(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<MoviesPage>> {
    let Query(params) = params.map_err(|rejection| AppError::Validation {
        message: rejection.body_text(),
        field: None,
    })?;

    let request = PageRequest::parse(params.page.as_deref())?;

    let page = state
        .catalog()
        .list(params.title.as_deref(), request)
        .await?;

    Ok(Json(page))
}

/// Get one filmwork by id
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FilmworkRow>> {
    // A malformed id cannot name an existing filmwork
    let id = Uuid::parse_str(&id).map_err(|_| AppError::FilmworkNotFound { id: id.clone() })?;

    let filmwork = state.catalog().detail(id).await?;

    Ok(Json(filmwork))
}

/// Any method other than GET on a catalog route
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
    }
}
