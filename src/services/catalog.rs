use crate::{
    models::{Credits, FullMovieDetails, MovieId, MovieSummary},
    services::providers::MovieProvider,
};

/// Placeholder director name when the credits list none
pub const UNKNOWN_DIRECTOR: &str = "unknown";

/// Number of top-billed cast members included in movie details
pub const CAST_LIMIT: usize = 5;

/// Service function for movie search
///
/// Delegates to the configured MovieProvider and keeps its relevance order.
/// Provider failures degrade to an empty list.
pub async fn search_movies(provider: &dyn MovieProvider, query: &str) -> Vec<MovieSummary> {
    let query = query.trim();
    if query.is_empty() || !provider.is_configured() {
        return Vec::new();
    }

    provider.search_movies(query).await.unwrap_or_else(|e| {
        tracing::warn!(query = %query, error = %e, "Movie search failed");
        Vec::new()
    })
}

/// Movies trending this week, in provider order
pub async fn weekly_trends(provider: &dyn MovieProvider) -> Vec<MovieSummary> {
    if !provider.is_configured() {
        return Vec::new();
    }

    provider.weekly_trending().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Weekly trends fetch failed");
        Vec::new()
    })
}

/// Fetches movie details together with director and top cast
///
/// Details and credits are requested concurrently. Returns `None` when the details
/// are unavailable; missing credits only fall back to placeholders.
pub async fn full_details(
    provider: &dyn MovieProvider,
    movie_id: MovieId,
) -> Option<FullMovieDetails> {
    if !provider.is_configured() {
        return None;
    }

    let (details, credits) = tokio::join!(
        provider.movie_details(movie_id),
        provider.movie_credits(movie_id)
    );

    let details = match details {
        Ok(Some(details)) => details,
        Ok(None) => {
            tracing::debug!(movie_id, "Movie not found");
            return None;
        }
        Err(e) => {
            tracing::warn!(movie_id, error = %e, "Movie details fetch failed");
            return None;
        }
    };

    let credits = credits.unwrap_or_else(|e| {
        tracing::warn!(movie_id, error = %e, "Movie credits fetch failed");
        None
    });

    Some(FullMovieDetails {
        director: director_names(credits.as_ref()),
        cast: top_cast(credits.as_ref()),
        details,
    })
}

/// Comma-joined names of every crew member credited as "Director"
fn director_names(credits: Option<&Credits>) -> String {
    let directors: Vec<&str> = credits
        .map(|credits| {
            credits
                .crew
                .iter()
                .filter(|member| member.job == "Director")
                .map(|member| member.name.as_str())
                .collect()
        })
        .unwrap_or_default();

    if directors.is_empty() {
        UNKNOWN_DIRECTOR.to_string()
    } else {
        directors.join(", ")
    }
}

fn top_cast(credits: Option<&Credits>) -> Vec<String> {
    credits
        .map(|credits| {
            credits
                .cast
                .iter()
                .take(CAST_LIMIT)
                .map(|member| member.name.clone())
                .collect()
        })
        .unwrap_or_default()
}
