use serde::{Deserialize, Serialize};

use crate::models::{
    CollectionGroup, FullMovieDetails, MovieId, MovieSummary, RecommendationResult,
};

/// Poster shown when TMDB has no poster for a movie
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Builds absolute TMDB image URLs from relative image paths
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
}

impl ImageUrls {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `w500` poster URL, or the placeholder image
    pub fn poster(&self, poster_path: Option<&str>) -> String {
        match poster_path.filter(|path| !path.is_empty()) {
            Some(path) => format!("{}/w500{}", self.base_url, path),
            None => POSTER_PLACEHOLDER.to_string(),
        }
    }

    /// Original-size backdrop URL, if the movie has one
    pub fn backdrop(&self, backdrop_path: Option<&str>) -> Option<String> {
        backdrop_path
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}/original{}", self.base_url, path))
    }
}

/// Movie as rendered by the frontend's poster grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub poster: String,
    /// Release year, empty when unknown
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
}

impl MovieCard {
    pub fn new(movie: &MovieSummary, images: &ImageUrls) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster: images.poster(movie.poster_path.as_deref()),
            year: movie.year(),
            vote_average: movie.vote_average,
        }
    }

    pub fn from_list(movies: &[MovieSummary], images: &ImageUrls) -> Vec<Self> {
        movies.iter().map(|movie| Self::new(movie, images)).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SequelGroupCard {
    pub id: u64,
    pub title: String,
    pub movies: Vec<MovieCard>,
}

impl SequelGroupCard {
    pub fn new(group: &CollectionGroup, images: &ImageUrls) -> Self {
        Self {
            id: group.id,
            title: group.title.clone(),
            movies: MovieCard::from_list(&group.movies, images),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationsResponse {
    pub sequels: Vec<SequelGroupCard>,
    pub recommendations: Vec<MovieCard>,
}

impl RecommendationsResponse {
    pub fn new(result: &RecommendationResult, images: &ImageUrls) -> Self {
        Self {
            sequels: result
                .sequels
                .iter()
                .map(|group| SequelGroupCard::new(group, images))
                .collect(),
            recommendations: MovieCard::from_list(&result.recommendations, images),
        }
    }
}

/// Movie details for the frontend's detail modal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetailsCard {
    #[serde(flatten)]
    pub card: MovieCard,
    pub backdrop: Option<String>,
    pub overview: String,
    pub release_date: Option<String>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub director: String,
    pub cast: Vec<String>,
}

impl MovieDetailsCard {
    pub fn new(full: &FullMovieDetails, images: &ImageUrls) -> Self {
        let details = &full.details;

        Self {
            card: MovieCard::new(&details.summary, images),
            backdrop: images.backdrop(details.backdrop_path.as_deref()),
            overview: details.overview.clone(),
            release_date: details.summary.release_date.clone(),
            runtime: details.runtime,
            genres: details.genres.iter().map(|genre| genre.name.clone()).collect(),
            director: full.director.clone(),
            cast: full.cast.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, MovieDetails};

    fn images() -> ImageUrls {
        ImageUrls::new("https://image.tmdb.org/t/p/")
    }

    fn matrix() -> MovieSummary {
        MovieSummary {
            id: 603,
            title: "Matrix".to_string(),
            poster_path: Some("/matrix.jpg".to_string()),
            release_date: Some("1999-03-30".to_string()),
            vote_average: Some(8.2),
        }
    }

    #[test]
    fn test_poster_url() {
        assert_eq!(
            images().poster(Some("/matrix.jpg")),
            "https://image.tmdb.org/t/p/w500/matrix.jpg"
        );
        assert_eq!(images().poster(None), POSTER_PLACEHOLDER);
        assert_eq!(images().poster(Some("")), POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_backdrop_url() {
        assert_eq!(
            images().backdrop(Some("/bg.jpg")),
            Some("https://image.tmdb.org/t/p/original/bg.jpg".to_string())
        );
        assert_eq!(images().backdrop(None), None);
    }

    #[test]
    fn test_movie_card_serialization() {
        let mut movie = matrix();
        movie.vote_average = None;

        let json = serde_json::to_value(MovieCard::new(&movie, &images())).unwrap();

        assert_eq!(json["id"], 603);
        assert_eq!(json["year"], "1999");
        assert_eq!(json["poster"], "https://image.tmdb.org/t/p/w500/matrix.jpg");
        assert!(json.get("vote_average").is_none());
    }

    #[test]
    fn test_details_card_flattens_movie_card() {
        let full = FullMovieDetails {
            details: MovieDetails {
                summary: matrix(),
                backdrop_path: Some("/bg.jpg".to_string()),
                genres: vec![Genre {
                    id: 28,
                    name: "Aksiyon".to_string(),
                }],
                collection: None,
                runtime: Some(136),
                overview: "Neo".to_string(),
            },
            director: "Lana Wachowski, Lilly Wachowski".to_string(),
            cast: vec!["Keanu Reeves".to_string()],
        };

        let json = serde_json::to_value(MovieDetailsCard::new(&full, &images())).unwrap();

        assert_eq!(json["id"], 603);
        assert_eq!(json["title"], "Matrix");
        assert_eq!(json["vote_average"], 8.2);
        assert_eq!(json["backdrop"], "https://image.tmdb.org/t/p/original/bg.jpg");
        assert_eq!(json["genres"][0], "Aksiyon");
        assert_eq!(json["runtime"], 136);
        assert_eq!(json["cast"].as_array().unwrap().len(), 1);
    }
}
