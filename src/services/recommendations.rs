//! Recommendation aggregation
//!
//! Combines three sources for a set of seed movies:
//! 1. Sequel discovery: collections the seeds belong to, each listed once in release order
//! 2. Recommendation voting: candidates recommended for several seeds rank first
//! 3. Genre fallback: popular movies in the seeds' genres when voting yields too few
//!
//! Per-seed provider calls run concurrently, but results are consumed in seed order,
//! so the output is the same as a sequential run. A failed sub-fetch only removes that
//! piece of data; it never fails the whole aggregation.

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{
        CollectionGroup, CollectionId, MovieDetails, MovieId, MovieSummary, RecommendationResult,
    },
    services::providers::MovieProvider,
};

/// Below this many voted candidates, genre discovery tops up the list
pub const MIN_RANKED_CANDIDATES: usize = 5;

/// Sort order for genre discovery
pub const DISCOVER_SORT_BY: &str = "popularity.desc";

/// Trailing collection-name suffixes, checked in order; only the first match is removed
const COLLECTION_SUFFIXES: [&str; 8] = [
    " Serisi",
    " Koleksiyonu",
    " Collection",
    " Series",
    " - Seri",
    " - Koleksiyon",
    " [Seri]",
    " [Koleksiyon]",
];

/// Builds sequel groups and ranked recommendations from a set of seed movies
#[derive(Clone)]
pub struct RecommendationAggregator {
    provider: Arc<dyn MovieProvider>,
}

impl RecommendationAggregator {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self { provider }
    }

    /// Aggregates sequels and recommendations for the given seed movies
    ///
    /// Repeated ids are collapsed, keeping first-occurrence order. An empty seed set
    /// or an unconfigured provider yields an empty result.
    pub async fn aggregate(&self, movie_ids: &[MovieId]) -> RecommendationResult {
        let seeds = unique_ids(movie_ids);
        if seeds.is_empty() {
            return RecommendationResult::default();
        }

        if !self.provider.is_configured() {
            tracing::warn!(
                provider = self.provider.name(),
                "Movie provider not configured, returning empty recommendations"
            );
            return RecommendationResult::default();
        }

        let seed_set: HashSet<MovieId> = seeds.iter().copied().collect();

        // Details feed both sequel discovery and the genre fallback
        let details = self
            .fetch_each(&seeds, "details", |provider, id| async move {
                provider.movie_details(id).await
            })
            .await;

        let sequels = self.discover_sequels(&details).await;

        let recommendations: Vec<MovieSummary> = if seeds.len() == 1 {
            self.fetch_each(&seeds, "recommendations", |provider, id| async move {
                provider.movie_recommendations(id).await.map(Some)
            })
            .await
            .into_iter()
            .flatten()
            .flatten()
            .collect()
        } else {
            let lists: Vec<Vec<MovieSummary>> = self
                .fetch_each(&seeds, "recommendations", |provider, id| async move {
                    provider.movie_recommendations(id).await.map(Some)
                })
                .await
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect();

            let mut ranked = rank_candidates(&lists, &seed_set);

            if ranked.len() < MIN_RANKED_CANDIDATES {
                let discovered = self.discover_by_genres(&details).await;
                append_unseen(&mut ranked, discovered, &seed_set);
            }

            ranked
        };

        let recommendations = exclude_known(recommendations, &sequels, &seed_set);

        tracing::info!(
            seeds = seeds.len(),
            sequel_groups = sequels.len(),
            recommendations = recommendations.len(),
            "Recommendations aggregated"
        );

        RecommendationResult {
            sequels,
            recommendations,
        }
    }

    /// Fetches the collection of every seed that declares one, once per collection id
    async fn discover_sequels(&self, details: &[Option<MovieDetails>]) -> Vec<CollectionGroup> {
        let mut seen = HashSet::new();
        let collection_ids: Vec<CollectionId> = details
            .iter()
            .flatten()
            .filter_map(|movie| movie.collection.as_ref().map(|collection| collection.id))
            .filter(|id| seen.insert(*id))
            .collect();

        if collection_ids.is_empty() {
            return Vec::new();
        }

        self.fetch_each(&collection_ids, "collection", |provider, id| async move {
            provider.collection(id).await
        })
        .await
        .into_iter()
        .flatten()
        .map(|collection| {
            let mut movies = collection.parts;
            sort_by_release_date(&mut movies);

            CollectionGroup {
                id: collection.id,
                title: clean_collection_name(&collection.name),
                movies,
            }
        })
        .collect()
    }

    /// Popular movies in any of the seeds' genres
    async fn discover_by_genres(&self, details: &[Option<MovieDetails>]) -> Vec<MovieSummary> {
        let genre_ids: Vec<u64> = details
            .iter()
            .flatten()
            .flat_map(|movie| movie.genres.iter().map(|genre| genre.id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if genre_ids.is_empty() {
            return Vec::new();
        }

        match self
            .provider
            .discover_by_genres(&genre_ids, DISCOVER_SORT_BY)
            .await
        {
            Ok(movies) => {
                tracing::debug!(
                    genres = ?genre_ids,
                    discovered = movies.len(),
                    "Genre fallback discovery completed"
                );
                movies
            }
            Err(e) => {
                tracing::warn!(error = %e, "Genre discovery failed, skipping fallback");
                Vec::new()
            }
        }
    }

    /// Runs one provider fetch per id concurrently and collects results in id order
    ///
    /// Failed fetches are logged and come back as `None`.
    async fn fetch_each<T, F, Fut>(
        &self,
        ids: &[u64],
        what: &'static str,
        fetch: F,
    ) -> Vec<Option<T>>
    where
        T: Send + 'static,
        F: Fn(Arc<dyn MovieProvider>, u64) -> Fut,
        Fut: Future<Output = AppResult<Option<T>>> + Send + 'static,
    {
        let tasks: Vec<_> = ids
            .iter()
            .map(|&id| (id, tokio::spawn(fetch(self.provider.clone(), id))))
            .collect();

        let mut results = Vec::with_capacity(tasks.len());
        let mut failures = 0;

        for (id, task) in tasks {
            let value = match task.await {
                Ok(Ok(value)) => value,
                Ok(Err(e)) => {
                    tracing::warn!(id, fetch = what, error = %e, "Provider fetch failed");
                    failures += 1;
                    None
                }
                Err(e) => {
                    tracing::error!(id, fetch = what, error = %e, "Task join error");
                    failures += 1;
                    None
                }
            };
            results.push(value);
        }

        if failures > 0 {
            tracing::warn!(
                fetch = what,
                success_count = ids.len() - failures,
                error_count = failures,
                "Partial provider fetch failure"
            );
        }

        results
    }
}

/// Removes repeated ids, keeping the first occurrence
fn unique_ids(movie_ids: &[MovieId]) -> Vec<MovieId> {
    let mut seen = HashSet::new();
    movie_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Strips one known collection suffix (case-insensitive) from a collection name
///
/// `"Matrix Serisi"` becomes `"Matrix"`; names without a known suffix come back unchanged.
pub fn clean_collection_name(name: &str) -> String {
    for suffix in COLLECTION_SUFFIXES {
        let Some(cut) = name.len().checked_sub(suffix.len()) else {
            continue;
        };

        if name.is_char_boundary(cut) && name[cut..].to_lowercase() == suffix.to_lowercase() {
            return name[..cut].trim().to_string();
        }
    }

    name.to_string()
}

/// Stable sort by release date ascending; missing or unparseable dates go last
pub fn sort_by_release_date(movies: &mut [MovieSummary]) {
    movies.sort_by_key(|movie| movie.release_day().unwrap_or(NaiveDate::MAX));
}

/// Ranks candidates by how many seed lists recommend them
///
/// Seeds themselves are skipped. Equal counts keep first-seen order.
fn rank_candidates(lists: &[Vec<MovieSummary>], seeds: &HashSet<MovieId>) -> Vec<MovieSummary> {
    let mut positions: HashMap<MovieId, usize> = HashMap::new();
    let mut tallies: Vec<(usize, MovieSummary)> = Vec::new();

    for movie in lists.iter().flatten() {
        if seeds.contains(&movie.id) {
            continue;
        }

        match positions.get(&movie.id) {
            Some(&position) => tallies[position].0 += 1,
            None => {
                positions.insert(movie.id, tallies.len());
                tallies.push((1, movie.clone()));
            }
        }
    }

    tallies.sort_by(|a, b| b.0.cmp(&a.0));
    tallies.into_iter().map(|(_, movie)| movie).collect()
}

/// Appends discovered movies that are neither ranked already nor seeds
fn append_unseen(
    ranked: &mut Vec<MovieSummary>,
    discovered: Vec<MovieSummary>,
    seeds: &HashSet<MovieId>,
) {
    let mut existing: HashSet<MovieId> = ranked.iter().map(|movie| movie.id).collect();
    existing.extend(seeds);

    for movie in discovered {
        if existing.insert(movie.id) {
            ranked.push(movie);
        }
    }
}

/// Drops seeds, sequel-group members and repeats from the recommendation list
fn exclude_known(
    recommendations: Vec<MovieSummary>,
    sequels: &[CollectionGroup],
    seeds: &HashSet<MovieId>,
) -> Vec<MovieSummary> {
    let mut excluded: HashSet<MovieId> = sequels
        .iter()
        .flat_map(|group| group.movies.iter().map(|movie| movie.id))
        .collect();
    excluded.extend(seeds);

    recommendations
        .into_iter()
        .filter(|movie| excluded.insert(movie.id))
        .collect()
}
