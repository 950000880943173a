use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod tmdb;

/// TMDB movie identifier
pub type MovieId = u64;

/// TMDB collection identifier
pub type CollectionId = u64;

/// A movie as it appears in provider result lists (search, trending, recommendations, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// ISO date (`YYYY-MM-DD`); the provider sends an empty string for unknown dates
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl MovieSummary {
    /// Parsed release date, `None` when missing or not a valid ISO date
    pub fn release_day(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
    }

    /// Four-character release year, or an empty string
    pub fn year(&self) -> String {
        self.release_date
            .as_deref()
            .map(|date| date.chars().take(4).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Reference to the collection (sequel chain) a movie belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionRef {
    pub id: CollectionId,
    #[serde(default)]
    pub name: String,
}

/// Full movie record returned by the details endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieDetails {
    pub summary: MovieSummary,
    pub backdrop_path: Option<String>,
    pub genres: Vec<Genre>,
    pub collection: Option<CollectionRef>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    pub overview: String,
}

/// A provider collection with its member movies in provider order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub id: CollectionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parts: Vec<MovieSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// Cast and crew of a movie; cast is in billing order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// A sequel chain surfaced alongside recommendations
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionGroup {
    pub id: CollectionId,
    /// Collection name with its "Collection"/"Serisi"-style suffix removed
    pub title: String,
    /// Ordered by release date ascending, undated movies last
    pub movies: Vec<MovieSummary>,
}

/// Output of the recommendation aggregator
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RecommendationResult {
    pub sequels: Vec<CollectionGroup>,
    pub recommendations: Vec<MovieSummary>,
}

impl RecommendationResult {
    pub fn is_empty(&self) -> bool {
        self.sequels.is_empty() && self.recommendations.is_empty()
    }
}

/// Movie details enriched with credits for the detail view
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FullMovieDetails {
    pub details: MovieDetails,
    /// Comma-joined director names
    pub director: String,
    /// Top-billed cast names
    pub cast: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(release_date: Option<&str>) -> MovieSummary {
        MovieSummary {
            id: 603,
            title: "The Matrix".to_string(),
            poster_path: None,
            release_date: release_date.map(str::to_string),
            vote_average: None,
        }
    }

    #[test]
    fn test_release_day_parses_iso_date() {
        let movie = summary(Some("1999-03-30"));
        assert_eq!(movie.release_day(), NaiveDate::from_ymd_opt(1999, 3, 30));
    }

    #[test]
    fn test_release_day_empty_or_garbage() {
        assert_eq!(summary(Some("")).release_day(), None);
        assert_eq!(summary(Some("someday")).release_day(), None);
        assert_eq!(summary(None).release_day(), None);
    }

    #[test]
    fn test_year() {
        assert_eq!(summary(Some("1999-03-30")).year(), "1999");
        assert_eq!(summary(Some("")).year(), "");
        assert_eq!(summary(None).year(), "");
    }

    #[test]
    fn test_movie_summary_deserialization_with_nulls() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "poster_path": null,
            "release_date": "2010-07-15",
            "vote_average": 8.4,
            "popularity": 120.5
        }"#;

        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.vote_average, Some(8.4));
    }

    #[test]
    fn test_credits_deserialization_defaults() {
        let credits: Credits = serde_json::from_str(r#"{"id": 603}"#).unwrap();
        assert!(credits.cast.is_empty());
        assert!(credits.crew.is_empty());
    }
}
