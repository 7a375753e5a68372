/// Catalog data provider abstraction
///
/// The matchmaking engine and the title proxy routes only care about getting
/// candidate title records back; the concrete upstream (Kinopoisk Unofficial
/// API) lives behind this trait so tests can script candidate streams.
use crate::{error::AppResult, models::TitleRecord};

pub mod kinopoisk;

#[cfg(test)]
use mockall::automock;

/// Trait for external title catalogs
///
/// Every lookup returns an ordered sequence of title records. Ordering matters:
/// the engine's candidate cursor takes the first unshown record, so providers
/// must preserve upstream order rather than re-sorting.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Titles of a given genre released in a given year
    async fn by_genre_and_year(&self, genre: &str, year: i32) -> AppResult<Vec<TitleRecord>>;

    /// A small batch of arbitrary films
    async fn random_movie(&self) -> AppResult<Vec<TitleRecord>>;

    /// A small batch of arbitrary series
    async fn random_series(&self) -> AppResult<Vec<TitleRecord>>;

    /// Titles whose name matches the query
    async fn search_by_title(&self, title: &str) -> AppResult<Vec<TitleRecord>>;

    /// Filmography lookup: resolve the person, then list their films
    async fn search_by_actor(&self, name: &str) -> AppResult<Vec<TitleRecord>>;
}
