//! Movie metadata provider abstraction
//!
//! The aggregator and catalog services only talk to the metadata source through
//! this trait, so the TMDB client can be swapped for an in-memory provider in tests.

use crate::{
    error::AppResult,
    models::{Collection, CollectionId, Credits, MovieDetails, MovieId, MovieSummary},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Lookups by id return `Ok(None)` when the provider reports the resource as missing.
/// Any other failure (transport, timeout, non-success status, bad payload) is an `Err`;
/// callers decide whether that is fatal.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Whether the provider has the credentials it needs to make requests
    fn is_configured(&self) -> bool;

    /// Search movies by title, in provider relevance order
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    async fn movie_details(&self, movie_id: MovieId) -> AppResult<Option<MovieDetails>>;

    /// Provider-ranked recommendations for a single movie (first page)
    async fn movie_recommendations(&self, movie_id: MovieId) -> AppResult<Vec<MovieSummary>>;

    async fn collection(&self, collection_id: CollectionId) -> AppResult<Option<Collection>>;

    /// Discover movies matching any of the given genres (first page)
    async fn discover_by_genres(
        &self,
        genre_ids: &[u64],
        sort_by: &str,
    ) -> AppResult<Vec<MovieSummary>>;

    async fn movie_credits(&self, movie_id: MovieId) -> AppResult<Option<Credits>>;

    /// Movies trending over the past week
    async fn weekly_trending(&self) -> AppResult<Vec<MovieSummary>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
