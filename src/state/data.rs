//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the TMDB client and the UI layer.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single movie as returned by the TMDB list endpoints
///
/// Field names follow the API's snake_case JSON keys so the same struct
/// is used for decoding responses and for encoding navigation payloads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Movie {
    /// Unique TMDB ID
    pub id: i64,
    pub title: String,
    /// Relative poster path (e.g., "/wkfG7DaExmcVsGLR4kLouMwxeT5.jpg")
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Relative backdrop path, drives the home screen background
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    /// Release date as sent by the API ("YYYY-MM-DD", may be empty)
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,

    // ========== Details ==========
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub video: bool,
}

impl Movie {
    /// Convert to JSON string for navigation payloads
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string (from a navigation route)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Year part of the release date, if the API sent a valid one
    pub fn release_year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .ok()
            .map(|date| date.year())
    }
}

/// One page of a movie list endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MovieList {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl MovieList {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}

/// The four catalog lists shown on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Popular,
    NowPlaying,
    TopRated,
    Upcoming,
}

impl Category {
    /// Every category, in the order they are laid out on screen
    pub const ALL: [Category; 4] = [
        Category::Popular,
        Category::NowPlaying,
        Category::TopRated,
        Category::Upcoming,
    ];

    /// Path segment under `/3/movie/`
    pub fn endpoint(self) -> &'static str {
        match self {
            Category::Popular => "popular",
            Category::NowPlaying => "now_playing",
            Category::TopRated => "top_rated",
            Category::Upcoming => "upcoming",
        }
    }

    /// Section heading
    pub fn title(self) -> &'static str {
        match self {
            Category::Popular => "Popular",
            Category::NowPlaying => "Playing now",
            Category::TopRated => "Top rated",
            Category::Upcoming => "Upcoming",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint())
    }
}

#[cfg(test)]
pub(crate) fn sample_movie(id: i64, backdrop: Option<&str>) -> Movie {
    Movie {
        id,
        title: format!("Movie {}", id),
        poster_path: Some(format!("/poster{}.jpg", id)),
        backdrop_path: backdrop.map(str::to_string),
        popularity: 10.0 * id as f64,
        release_date: "2024-03-02".to_string(),
        vote_average: 6.9,
        vote_count: 286,
        overview: String::new(),
        original_title: None,
        original_language: Some("en".to_string()),
        genre_ids: vec![28, 12],
        adult: false,
        video: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KUNG_FU_PANDA: &str = r#"{
        "adult": false,
        "backdrop_path": "/1XDDXPXGiI8id7MrUxK36ke7gkX.jpg",
        "genre_ids": [28, 12, 16, 35, 10751],
        "id": 1011985,
        "original_language": "en",
        "original_title": "Kung Fu Panda 4",
        "overview": "Po is gearing up to become the spiritual leader of his Valley of Peace...",
        "popularity": 5263.595,
        "poster_path": "/wkfG7DaExmcVsGLR4kLouMwxeT5.jpg",
        "release_date": "2024-03-02",
        "title": "Kung Fu Panda 4",
        "video": false,
        "vote_average": 6.916,
        "vote_count": 286
    }"#;

    #[test]
    fn test_parse_api_movie() {
        let movie = Movie::from_json(KUNG_FU_PANDA).unwrap();

        assert_eq!(movie.id, 1011985);
        assert_eq!(movie.title, "Kung Fu Panda 4");
        assert_eq!(movie.poster_path.as_deref(), Some("/wkfG7DaExmcVsGLR4kLouMwxeT5.jpg"));
        assert_eq!(movie.genre_ids.len(), 5);
        assert_eq!(movie.vote_count, 286);
    }

    #[test]
    fn test_null_and_missing_paths() {
        let movie = Movie::from_json(
            r#"{"id": 7, "title": "No Art", "poster_path": null, "release_date": ""}"#,
        )
        .unwrap();

        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.backdrop_path, None);
        assert_eq!(movie.release_year(), None);
        assert!(movie.overview.is_empty());
    }

    #[test]
    fn test_release_year() {
        assert_eq!(sample_movie(1, None).release_year(), Some(2024));
    }

    #[test]
    fn test_category_endpoints() {
        let endpoints: Vec<_> = Category::ALL.iter().map(|c| c.endpoint()).collect();
        assert_eq!(endpoints, ["popular", "now_playing", "top_rated", "upcoming"]);
        assert_eq!(Category::NowPlaying.title(), "Playing now");
    }
}
