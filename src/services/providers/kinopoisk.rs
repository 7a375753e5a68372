/// Kinopoisk Unofficial API provider
///
/// Backs every catalog lookup with the `/api/v2.2/films` search endpoint,
/// except actor search, which is a two-step lookup against the v1 staff
/// endpoints (person by name, then that person's films).
///
/// The API key and base URL are injected at construction; nothing here reads
/// process-wide state.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{KinopoiskFilm, KinopoiskFilmsResponse, KinopoiskStaffEntry, KinopoiskStaffFilm, TitleRecord},
    services::providers::CatalogProvider,
};

/// The random endpoints return at most this many records
const RANDOM_BATCH_SIZE: usize = 5;

#[derive(Clone)]
pub struct KinopoiskProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl KinopoiskProvider {
    /// Creates a provider with a client-level timeout on every request
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    /// Runs a films search with the given query parameters
    async fn search_films(&self, params: &[(&str, String)]) -> AppResult<Vec<KinopoiskFilm>> {
        let url = format!("{}/api/v2.2/films", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::CatalogUnavailable(format!(
                "Kinopoisk API returned status {}",
                status
            )));
        }

        let parsed: KinopoiskFilmsResponse = response.json().await?;
        Ok(parsed.films)
    }

    /// Keeps only records of the requested type and truncates to the batch size.
    ///
    /// The films search sometimes mixes types despite the type filter, so the
    /// result is filtered again client-side.
    fn keep_type(films: Vec<KinopoiskFilm>, film_type: &str) -> Vec<TitleRecord> {
        films
            .into_iter()
            .filter(|f| f.film_type.as_deref() == Some(film_type))
            .map(TitleRecord::from)
            .take(RANDOM_BATCH_SIZE)
            .collect()
    }
}

#[async_trait::async_trait]
impl CatalogProvider for KinopoiskProvider {
    async fn by_genre_and_year(&self, genre: &str, year: i32) -> AppResult<Vec<TitleRecord>> {
        let params = [
            ("field", "genres.name".to_string()),
            ("value", genre.to_string()),
            ("field", "year".to_string()),
            ("value", year.to_string()),
            ("page", "1".to_string()),
        ];

        let films = self.search_films(&params).await?;

        // The search endpoint reports a film's full genre list; stamp the
        // queried genre so callers see why the record was selected.
        let titles: Vec<TitleRecord> = films
            .into_iter()
            .map(|film| {
                let mut record = TitleRecord::from(film);
                record.genre = Some(genre.to_string());
                record
            })
            .collect();

        tracing::info!(
            genre = %genre,
            year = year,
            results = titles.len(),
            provider = "kinopoisk",
            "Genre search completed"
        );

        Ok(titles)
    }

    async fn random_movie(&self) -> AppResult<Vec<TitleRecord>> {
        let params = [
            ("field", "type".to_string()),
            ("value", "FILM".to_string()),
            ("ratingFrom", "0".to_string()),
            ("ratingTo", "10".to_string()),
            ("yearFrom", "1900".to_string()),
            ("yearTo", "2026".to_string()),
            ("isSerial", "false".to_string()),
            ("page", "1".to_string()),
        ];

        let films = self.search_films(&params).await?;
        let titles = Self::keep_type(films, "FILM");

        tracing::info!(
            results = titles.len(),
            provider = "kinopoisk",
            "Random movie batch fetched"
        );

        Ok(titles)
    }

    async fn random_series(&self) -> AppResult<Vec<TitleRecord>> {
        let params = [
            ("field", "type".to_string()),
            ("value", "TV_SERIES".to_string()),
            ("ratingFrom", "0".to_string()),
            ("ratingTo", "10".to_string()),
            ("yearFrom", "1950".to_string()),
            ("yearTo", "2026".to_string()),
            ("isSerial", "true".to_string()),
            ("page", "1".to_string()),
        ];

        let films = self.search_films(&params).await?;
        let titles = Self::keep_type(films, "TV_SERIES");

        tracing::info!(
            results = titles.len(),
            provider = "kinopoisk",
            "Random series batch fetched"
        );

        Ok(titles)
    }

    async fn search_by_title(&self, title: &str) -> AppResult<Vec<TitleRecord>> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let params = [
            ("field", "name.ru".to_string()),
            ("value", title.to_string()),
            ("page", "1".to_string()),
        ];

        let films = self.search_films(&params).await?;
        let titles: Vec<TitleRecord> = films.into_iter().map(TitleRecord::from).collect();

        tracing::info!(
            query = %title,
            results = titles.len(),
            provider = "kinopoisk",
            "Title search completed"
        );

        Ok(titles)
    }

    async fn search_by_actor(&self, name: &str) -> AppResult<Vec<TitleRecord>> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Actor name cannot be empty".to_string(),
            ));
        }

        let staff_url = format!("{}/api/v1/staff", self.api_url);
        let response = self
            .http_client
            .get(&staff_url)
            .header("X-API-KEY", &self.api_key)
            .query(&[("filmId", "0"), ("name", name)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::CatalogUnavailable(format!(
                "Kinopoisk staff API returned status {}",
                status
            )));
        }

        let staff: Vec<KinopoiskStaffEntry> = response.json().await?;
        let Some(person) = staff.first() else {
            return Ok(Vec::new());
        };

        let films_url = format!("{}/api/v1/staff/{}/films", self.api_url, person.staff_id);
        let response = self
            .http_client
            .get(&films_url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::CatalogUnavailable(format!(
                "Kinopoisk filmography API returned status {}",
                status
            )));
        }

        let films: Vec<KinopoiskStaffFilm> = response.json().await?;
        let titles: Vec<TitleRecord> = films.into_iter().map(TitleRecord::from).collect();

        tracing::info!(
            actor = %name,
            results = titles.len(),
            provider = "kinopoisk",
            "Actor filmography fetched"
        );

        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(id: i64, film_type: &str) -> KinopoiskFilm {
        KinopoiskFilm {
            film_id: id,
            name_ru: None,
            name_en: None,
            description: None,
            poster_url_preview: None,
            year: None,
            genres: vec![],
            rating: None,
            film_type: Some(film_type.to_string()),
        }
    }

    #[test]
    fn test_keep_type_filters_and_truncates() {
        let mut films: Vec<KinopoiskFilm> = (1..=7).map(|id| film(id, "FILM")).collect();
        films.insert(2, film(100, "TV_SERIES"));

        let kept = KinopoiskProvider::keep_type(films, "FILM");

        assert_eq!(kept.len(), RANDOM_BATCH_SIZE);
        assert!(kept.iter().all(|t| t.id != 100));
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_keep_type_drops_untyped_records() {
        let films = vec![
            KinopoiskFilm {
                film_type: None,
                ..film(1, "FILM")
            },
            film(2, "FILM"),
        ];

        let kept = KinopoiskProvider::keep_type(films, "FILM");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }

    #[test]
    fn test_provider_construction() {
        let provider = KinopoiskProvider::new(
            "test_key".to_string(),
            "http://test.local".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(provider.api_url, "http://test.local");
    }
}
