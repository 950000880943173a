//! TMDB (The Movie Database) v3 API provider
//!
//! Every request carries the `api_key` and `language` query parameters. A 404 maps
//! to `Ok(None)` so callers can tell "no such movie" apart from a failing upstream.
//!
//! API Flow:
//! 1. Search / trending / discover / recommendations: paged `results` lists, first page only
//! 2. Details, collection, credits: single objects keyed by id

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        tmdb::{TmdbMovieDetails, TmdbPage},
        Collection, CollectionId, Credits, MovieDetails, MovieId, MovieSummary,
    },
    services::providers::MovieProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const FIRST_PAGE: &str = "1";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    /// Creates a new TMDB provider whose requests all time out after `timeout`
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        language: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.api_key().map(str::to_string),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
            config.request_timeout(),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Issues a GET against the API and decodes the JSON body
    ///
    /// Returns `Ok(None)` on 404 and an error for any other non-success status.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<Option<T>> {
        let api_key = self.api_key.as_deref().ok_or(AppError::NotConfigured)?;

        let response = self
            .http_client
            .get(self.endpoint(path))
            .query(&[("api_key", api_key), ("language", self.language.as_str())])
            .query(params)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(path = %path, provider = "tmdb", "Resource not found");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                path = %path,
                status = %status,
                body = %body,
                "TMDB request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        // reqwest errors carry the request URL, which includes the api key
        let body = response
            .json::<T>()
            .await
            .map_err(reqwest::Error::without_url)?;
        Ok(Some(body))
    }

    /// Fetches a paged list endpoint, treating a missing resource as an empty list
    async fn get_results(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<Vec<MovieSummary>> {
        let page = self
            .get_json::<TmdbPage<MovieSummary>>(path, params)
            .await?;
        Ok(page.map(|page| page.results).unwrap_or_default())
    }
}

/// Joins genre ids with `|`, which TMDB reads as "any of"
fn join_genres(genre_ids: &[u64]) -> String {
    genre_ids
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        let results = self
            .get_results("/search/movie", &[("query", query)])
            .await?;

        tracing::info!(
            query = %query,
            results = results.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(results)
    }

    async fn movie_details(&self, movie_id: MovieId) -> AppResult<Option<MovieDetails>> {
        let details = self
            .get_json::<TmdbMovieDetails>(&format!("/movie/{}", movie_id), &[])
            .await?;
        Ok(details.map(MovieDetails::from))
    }

    async fn movie_recommendations(&self, movie_id: MovieId) -> AppResult<Vec<MovieSummary>> {
        self.get_results(
            &format!("/movie/{}/recommendations", movie_id),
            &[("page", FIRST_PAGE)],
        )
        .await
    }

    async fn collection(&self, collection_id: CollectionId) -> AppResult<Option<Collection>> {
        self.get_json::<Collection>(&format!("/collection/{}", collection_id), &[])
            .await
    }

    async fn discover_by_genres(
        &self,
        genre_ids: &[u64],
        sort_by: &str,
    ) -> AppResult<Vec<MovieSummary>> {
        let with_genres = join_genres(genre_ids);

        self.get_results(
            "/discover/movie",
            &[
                ("sort_by", sort_by),
                ("with_genres", with_genres.as_str()),
                ("page", FIRST_PAGE),
            ],
        )
        .await
    }

    async fn movie_credits(&self, movie_id: MovieId) -> AppResult<Option<Credits>> {
        self.get_json::<Credits>(&format!("/movie/{}/credits", movie_id), &[])
            .await
    }

    async fn weekly_trending(&self) -> AppResult<Vec<MovieSummary>> {
        self.get_results("/trending/movie/week", &[]).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
