use serde::{Deserialize, Serialize};

pub mod session;

pub use session::{MatchOutcome, PairSession};

/// A candidate title offered to a session, in the shape returned to clients.
///
/// The `id` is the catalog's numeric film identifier and is always present;
/// everything downstream (shown-set filtering, votes, match detection) keys on
/// it. The remaining fields are display data and may be defaulted when the
/// catalog omits them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TitleRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub poster_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

// ============================================================================
// Kinopoisk Unofficial API Types
// ============================================================================

/// Search response from `/api/v2.2/films`
#[derive(Debug, Clone, Deserialize)]
pub struct KinopoiskFilmsResponse {
    pub films: Vec<KinopoiskFilm>,
}

/// Raw film entry from the films search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct KinopoiskFilm {
    #[serde(rename = "filmId")]
    pub film_id: i64,
    #[serde(rename = "nameRu", default)]
    pub name_ru: Option<String>,
    #[serde(rename = "nameEn", default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "posterUrlPreview", default)]
    pub poster_url_preview: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<KinopoiskGenre>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "type", default)]
    pub film_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KinopoiskGenre {
    pub genre: String,
}

impl From<KinopoiskFilm> for TitleRecord {
    fn from(film: KinopoiskFilm) -> Self {
        let name = film
            .name_ru
            .filter(|s| !s.is_empty())
            .or(film.name_en.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "Untitled".to_string());

        TitleRecord {
            id: film.film_id,
            name,
            description: film.description.unwrap_or_default(),
            poster_url: film.poster_url_preview.unwrap_or_default(),
            year: film.year,
            genre: film.genres.into_iter().next().map(|g| g.genre),
            rating: film.rating,
        }
    }
}

/// Person entry from `/api/v1/staff` name search
#[derive(Debug, Clone, Deserialize)]
pub struct KinopoiskStaffEntry {
    #[serde(rename = "staffId")]
    pub staff_id: i64,
}

/// Film entry from `/api/v1/staff/{id}/films`
///
/// The v1 staff endpoint reports years as strings, unlike the v2.2 films
/// search, so the year is parsed during conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct KinopoiskStaffFilm {
    #[serde(rename = "filmId")]
    pub film_id: i64,
    #[serde(rename = "nameRu", default)]
    pub name_ru: Option<String>,
    #[serde(rename = "nameEn", default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl From<KinopoiskStaffFilm> for TitleRecord {
    fn from(film: KinopoiskStaffFilm) -> Self {
        let name = film
            .name_ru
            .filter(|s| !s.is_empty())
            .or(film.name_en.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "Untitled".to_string());

        TitleRecord {
            id: film.film_id,
            name,
            description: String::new(),
            poster_url: String::new(),
            year: film.year.and_then(|y| y.parse().ok()),
            genre: None,
            rating: film.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_film_to_title_record_full() {
        let json = r#"{
            "filmId": 263531,
            "nameRu": "Мстители",
            "nameEn": "The Avengers",
            "type": "FILM",
            "year": 2012,
            "description": "Локи получает доступ к неограниченной власти",
            "posterUrlPreview": "https://example.com/poster.jpg",
            "rating": 7.8,
            "genres": [{"genre": "фантастика"}, {"genre": "боевик"}]
        }"#;

        let film: KinopoiskFilm = serde_json::from_str(json).unwrap();
        let record: TitleRecord = film.into();

        assert_eq!(record.id, 263531);
        assert_eq!(record.name, "Мстители");
        assert_eq!(record.poster_url, "https://example.com/poster.jpg");
        assert_eq!(record.year, Some(2012));
        assert_eq!(record.genre, Some("фантастика".to_string()));
        assert_eq!(record.rating, Some(7.8));
    }

    #[test]
    fn test_film_name_falls_back_to_english() {
        let film = KinopoiskFilm {
            film_id: 77,
            name_ru: None,
            name_en: Some("Pulp Fiction".to_string()),
            film_type: None,
            description: None,
            poster_url_preview: None,
            year: None,
            genres: vec![],
            rating: None,
        };

        let record: TitleRecord = film.into();
        assert_eq!(record.name, "Pulp Fiction");
        assert_eq!(record.description, "");
        assert_eq!(record.poster_url, "");
        assert_eq!(record.genre, None);
    }

    #[test]
    fn test_film_name_falls_back_to_untitled() {
        let film = KinopoiskFilm {
            film_id: 78,
            name_ru: Some(String::new()),
            name_en: None,
            film_type: None,
            description: None,
            poster_url_preview: None,
            year: None,
            genres: vec![],
            rating: None,
        };

        let record: TitleRecord = film.into();
        assert_eq!(record.name, "Untitled");
    }

    #[test]
    fn test_staff_film_parses_string_year() {
        let json = r#"{
            "filmId": 447301,
            "nameRu": "Джанго освобожденный",
            "nameEn": "Django Unchained",
            "year": "2012",
            "rating": 8.2
        }"#;

        let film: KinopoiskStaffFilm = serde_json::from_str(json).unwrap();
        let record: TitleRecord = film.into();

        assert_eq!(record.id, 447301);
        assert_eq!(record.year, Some(2012));
        assert_eq!(record.rating, Some(8.2));
        assert_eq!(record.genre, None);
    }

    #[test]
    fn test_staff_film_tolerates_unparseable_year() {
        let film = KinopoiskStaffFilm {
            film_id: 1,
            name_ru: None,
            name_en: None,
            year: Some("unknown".to_string()),
            rating: None,
        };

        let record: TitleRecord = film.into();
        assert_eq!(record.year, None);
        assert_eq!(record.name, "Untitled");
    }

    #[test]
    fn test_title_record_serializes_camel_case() {
        let record = TitleRecord {
            id: 42,
            name: "Solaris".to_string(),
            description: String::new(),
            poster_url: "https://example.com/solaris.jpg".to_string(),
            year: Some(1972),
            genre: Some("драма".to_string()),
            rating: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["posterUrl"], "https://example.com/solaris.jpg");
        assert_eq!(json["year"], 1972);
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn test_films_response_deserialization() {
        let json = r#"{"films": [{"filmId": 1}, {"filmId": 2, "nameRu": "Сталкер"}]}"#;
        let response: KinopoiskFilmsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.films.len(), 2);
        assert_eq!(response.films[0].film_id, 1);
        assert_eq!(response.films[1].name_ru.as_deref(), Some("Сталкер"));
    }
}
