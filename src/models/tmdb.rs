// ============================================================================
// TMDB API Types
// ============================================================================

use serde::Deserialize;

use super::{CollectionRef, Genre, MovieDetails, MovieId, MovieSummary};

/// Paged list envelope used by search, trending, discover and recommendations
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TmdbPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<T>,
}

/// Raw `/movie/{id}` response
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub belongs_to_collection: Option<CollectionRef>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl From<TmdbMovieDetails> for MovieDetails {
    fn from(raw: TmdbMovieDetails) -> Self {
        MovieDetails {
            summary: MovieSummary {
                id: raw.id,
                title: raw.title,
                poster_path: raw.poster_path,
                release_date: raw.release_date,
                vote_average: raw.vote_average,
            },
            backdrop_path: raw.backdrop_path,
            genres: raw.genres,
            collection: raw.belongs_to_collection,
            runtime: raw.runtime,
            overview: raw.overview.unwrap_or_default(),
        }
    }
}
