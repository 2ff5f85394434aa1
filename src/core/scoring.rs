use crate::models::{Intent, Profile, ScoringWeights};

/// Intent component when both sides state the same goal
pub const SAME_INTENT: f64 = 1.0;
/// Intent component when either side is `not_sure`
pub const UNSURE_INTENT: f64 = 0.6;
/// Intent component for any other pairing
pub const MISMATCHED_INTENT: f64 = 0.2;

/// Calculate the compatibility score (0-100) between two profiles
///
/// Scoring formula:
/// score = round(100 * (
///     intent_compatibility * 0.4 +   # same goal / unsure / mismatch
///     profile_similarity * 0.6       # closeness of profile-quality scores
/// ))
///
/// A missing or NaN profile score on either side yields 0.
pub fn compute_match_score(requester: &Profile, candidate: &Profile) -> u8 {
    compute_match_score_with(requester, candidate, &ScoringWeights::default())
}

/// Same as [`compute_match_score`] with explicit component weights
pub fn compute_match_score_with(
    requester: &Profile,
    candidate: &Profile,
    weights: &ScoringWeights,
) -> u8 {
    let intent_score = intent_compatibility(requester.intent, candidate.intent);
    let similarity = profile_similarity(requester.profile_score, candidate.profile_score);

    let total = (intent_score * weights.intent + similarity * weights.similarity) * 100.0;

    if total.is_nan() {
        return 0;
    }

    total.round().clamp(0.0, 100.0) as u8
}

/// Intent compatibility (0-1)
///
/// An exact match wins; otherwise `not_sure` on either side beats a plain mismatch.
#[inline]
pub fn intent_compatibility(a: Option<Intent>, b: Option<Intent>) -> f64 {
    if a == b {
        SAME_INTENT
    } else if a == Some(Intent::NotSure) || b == Some(Intent::NotSure) {
        UNSURE_INTENT
    } else {
        MISMATCHED_INTENT
    }
}

/// Profile-quality similarity (0-1), NaN when either score is missing
#[inline]
fn profile_similarity(a: Option<f64>, b: Option<f64>) -> f64 {
    1.0 - (normalize_score(a) - normalize_score(b)).abs()
}

#[inline]
fn normalize_score(score: Option<f64>) -> f64 {
    // clamp keeps NaN as NaN
    score.map_or(f64::NAN, |s| (s / 100.0).clamp(0.0, 1.0))
}
