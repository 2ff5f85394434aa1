// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod height;
pub mod matcher;
pub mod scoring;

pub use distance::{haversine_distance_km, haversine_distance_m};
pub use filters::matches_criteria;
pub use height::parse_height_inches;
pub use matcher::{filter_candidates, Matcher, RankResult};
pub use scoring::{compute_match_score, compute_match_score_with, intent_compatibility};
