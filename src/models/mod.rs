// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{FilterCriteria, GeoPoint, Intent, Profile, ScoreRange, ScoreRangeError, ScoredCandidate, ScoringWeights};
pub use requests::{FilterCandidatesRequest, RankCandidatesRequest, ScorePairRequest};
pub use responses::{ErrorResponse, FilterCandidatesResponse, HealthResponse, RankCandidatesResponse, ScorePairResponse};
