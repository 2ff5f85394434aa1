//! Kindred Algo - compatibility scoring and candidate filtering for the Kindred dating app
//!
//! The core is a pair of pure functions: [`compute_match_score`] rates two
//! profiles 0-100, and [`filter_candidates`] narrows a candidate pool by the
//! discovery filter panel's criteria. Both are exposed over HTTP by the binary.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{compute_match_score, filter_candidates, Matcher, RankResult, distance::haversine_distance_km};
pub use models::{FilterCriteria, GeoPoint, Intent, Profile, ScoreRange, ScoredCandidate, ScoringWeights};
