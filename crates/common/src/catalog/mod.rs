//! Movie catalog core
//!
//! Flow of a request: filter and page parameters are parsed
//! ([`pagination`]), one aggregation statement is built ([`query`]) and run
//! against the read connection ([`service`]), and the rows are shaped into
//! the wire format ([`row`]).

pub mod pagination;
pub mod query;
pub mod row;
mod service;

pub use pagination::{Page, PageRequest, Paginator};
pub use query::{FilmworkFilter, FilmworkQuery};
pub use row::{FilmworkRow, MoviesPage};
pub use service::MovieCatalog;

/// Results per list page
pub const PAGE_SIZE: u64 = 50;
