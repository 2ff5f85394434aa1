use std::cmp::Ordering;

use crate::models::{FilterCriteria, GeoPoint, Profile, ScoredCandidate, ScoringWeights};
use crate::core::{
    distance::haversine_distance_km,
    filters::matches_criteria,
    scoring::compute_match_score_with,
};

/// Result of ranking a candidate pool
#[derive(Debug)]
pub struct RankResult {
    pub matches: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Candidate filtering and ranking orchestrator
///
/// Holds no state besides the scoring weights, so one instance can be shared
/// freely between threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a requester/candidate pair with this matcher's weights
    pub fn score(&self, requester: &Profile, candidate: &Profile) -> u8 {
        compute_match_score_with(requester, candidate, &self.weights)
    }

    /// Reduce a candidate pool to those satisfying every active criterion
    ///
    /// # Arguments
    /// * `requester` - The profile filtering, used for the match score range
    /// * `candidates` - The candidate pool; left untouched
    /// * `criteria` - Filter criteria, each field optional
    /// * `device_location` - Needed only by the distance criterion
    ///
    /// # Returns
    /// A new vector with the surviving candidates in their original order
    pub fn filter_candidates(
        &self,
        requester: &Profile,
        candidates: &[Profile],
        criteria: &FilterCriteria,
        device_location: Option<&GeoPoint>,
    ) -> Vec<Profile> {
        if criteria.is_empty() {
            tracing::debug!("No active criteria, keeping all {} candidates", candidates.len());
            return candidates.to_vec();
        }

        let filtered: Vec<Profile> = candidates
            .iter()
            .filter(|candidate| {
                matches_criteria(requester, candidate, criteria, device_location, &self.weights)
            })
            .cloned()
            .collect();

        tracing::debug!(
            "Filtered {} candidates down to {}",
            candidates.len(),
            filtered.len()
        );

        filtered
    }

    /// Filter, score and order a candidate pool for the discovery feed
    ///
    /// # Pipeline Stages
    /// 1. Drop the requester's own profile
    /// 2. Criteria filtering (see [`Matcher::filter_candidates`])
    /// 3. Scoring against the requester
    /// 4. Ranking by score (descending), then distance (ascending, unknown last)
    pub fn rank_candidates(
        &self,
        requester: &Profile,
        candidates: &[Profile],
        criteria: &FilterCriteria,
        device_location: Option<&GeoPoint>,
        limit: usize,
    ) -> RankResult {
        let total_candidates = candidates.len();

        let mut matches: Vec<ScoredCandidate> = candidates
            .iter()
            // Stage 1: Exclude self
            .filter(|candidate| !is_same_user(requester, candidate))
            // Stage 2: Criteria filtering
            .filter(|candidate| {
                matches_criteria(requester, candidate, criteria, device_location, &self.weights)
            })
            // Stage 3: Scoring
            .map(|candidate| {
                let distance_km = device_location
                    .zip(candidate.coordinates.as_ref())
                    .map(|(device, coordinates)| haversine_distance_km(device, coordinates));

                ScoredCandidate {
                    profile: candidate.clone(),
                    match_score: self.score(requester, candidate),
                    distance_km,
                }
            })
            .collect();

        // Stage 4: Ranking
        matches.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| compare_distance(a.distance_km, b.distance_km))
        });

        matches.truncate(limit);

        tracing::debug!(
            "Ranked {} matches from {} candidates",
            matches.len(),
            total_candidates
        );

        RankResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Filter a candidate pool with the default scoring weights
pub fn filter_candidates(
    requester: &Profile,
    candidates: &[Profile],
    criteria: &FilterCriteria,
    device_location: Option<&GeoPoint>,
) -> Vec<Profile> {
    Matcher::with_default_weights().filter_candidates(requester, candidates, criteria, device_location)
}

#[inline]
fn is_same_user(requester: &Profile, candidate: &Profile) -> bool {
    matches!((&requester.id, &candidate.id), (Some(a), Some(b)) if a == b)
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
