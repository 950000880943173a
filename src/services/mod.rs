pub mod catalog;
pub mod providers;
pub mod recommendations;

pub use providers::{MovieProvider, TmdbProvider};
pub use recommendations::RecommendationAggregator;
