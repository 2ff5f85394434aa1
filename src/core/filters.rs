use std::cmp::Ordering;

use crate::core::{distance::haversine_distance_km, height::parse_height_inches, scoring::compute_match_score_with};
use crate::models::{FilterCriteria, GeoPoint, Profile, ScoringWeights};

/// Check a candidate against every active criterion
///
/// Predicates run in a fixed order and stop at the first failure. A criterion
/// is skipped when either it or the candidate's field is absent.
#[inline]
pub fn matches_criteria(
    requester: &Profile,
    candidate: &Profile,
    criteria: &FilterCriteria,
    device_location: Option<&GeoPoint>,
    weights: &ScoringWeights,
) -> bool {
    passes_age(candidate, criteria)
        && passes_height(candidate, criteria)
        && passes_marital_status(candidate, criteria)
        && passes_location(candidate, criteria)
        && passes_distance(candidate, criteria, device_location)
        && passes_alcohol(candidate, criteria)
        && passes_smoking(candidate, criteria)
        && passes_intent(candidate, criteria)
        && passes_match_range(requester, candidate, criteria, weights)
}

/// Age ceiling. There is no lower bound.
#[inline]
pub fn passes_age(candidate: &Profile, criteria: &FilterCriteria) -> bool {
    match (candidate.age, criteria.age) {
        (Some(age), Some(max_age)) => not_above(age, max_age),
        _ => true,
    }
}

/// Height ceiling, compared in inches
#[inline]
pub fn passes_height(candidate: &Profile, criteria: &FilterCriteria) -> bool {
    match (non_empty(&candidate.height), non_empty(&criteria.height)) {
        (Some(height), Some(max_height)) => {
            parse_height_inches(height) <= parse_height_inches(max_height)
        }
        _ => true,
    }
}

/// Marital status, trimmed and case-insensitive
#[inline]
pub fn passes_marital_status(candidate: &Profile, criteria: &FilterCriteria) -> bool {
    match (non_blank(&candidate.marital_status), non_blank(&criteria.marital_status)) {
        (Some(status), Some(wanted)) => {
            status.trim().to_lowercase() == wanted.trim().to_lowercase()
        }
        _ => true,
    }
}

/// Named location, case-sensitive
#[inline]
pub fn passes_location(candidate: &Profile, criteria: &FilterCriteria) -> bool {
    exact_tag(&candidate.location, &criteria.location)
}

/// Great-circle distance from the device, in kilometers
#[inline]
pub fn passes_distance(
    candidate: &Profile,
    criteria: &FilterCriteria,
    device_location: Option<&GeoPoint>,
) -> bool {
    match (criteria.distance, device_location, candidate.coordinates.as_ref()) {
        (Some(max_km), Some(device), Some(coordinates)) => {
            not_above(haversine_distance_km(device, coordinates), max_km)
        }
        _ => true,
    }
}

#[inline]
pub fn passes_alcohol(candidate: &Profile, criteria: &FilterCriteria) -> bool {
    exact_tag(&candidate.alcohol, &criteria.alcohol)
}

#[inline]
pub fn passes_smoking(candidate: &Profile, criteria: &FilterCriteria) -> bool {
    exact_tag(&candidate.smoking, &criteria.smoking)
}

#[inline]
pub fn passes_intent(candidate: &Profile, criteria: &FilterCriteria) -> bool {
    match (candidate.intent, criteria.intent) {
        (Some(intent), Some(wanted)) => intent == wanted,
        _ => true,
    }
}

/// Match score range against the requester
///
/// Only applies when both profiles carry an intent and a profile score.
#[inline]
pub fn passes_match_range(
    requester: &Profile,
    candidate: &Profile,
    criteria: &FilterCriteria,
    weights: &ScoringWeights,
) -> bool {
    let Some(range) = criteria.match_range else {
        return true;
    };

    let scorable = |p: &Profile| p.intent.is_some() && p.profile_score.is_some();
    if !scorable(requester) || !scorable(candidate) {
        return true;
    }

    let score = compute_match_score_with(requester, candidate, weights);
    tracing::trace!("Match score {} against range {}", score, range);
    range.contains(score)
}

/// `value <= ceiling`, with NaN on either side passing
#[inline]
fn not_above(value: f64, ceiling: f64) -> bool {
    value.partial_cmp(&ceiling) != Some(Ordering::Greater)
}

#[inline]
fn exact_tag(candidate: &Option<String>, wanted: &Option<String>) -> bool {
    match (non_empty(candidate), non_empty(wanted)) {
        (Some(value), Some(wanted)) => value == wanted,
        _ => true,
    }
}

/// Empty strings count as absent
#[inline]
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Whitespace-only strings count as absent too
#[inline]
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Intent, ScoreRange};

    fn candidate() -> Profile {
        Profile {
            id: Some("candidate".to_string()),
            age: Some(28.0),
            height: Some("5'08\"".to_string()),
            marital_status: Some("Single".to_string()),
            location: Some("Lagos".to_string()),
            coordinates: Some(GeoPoint::new(6.5244, 3.3792)),
            alcohol: Some("socially".to_string()),
            smoking: Some("never".to_string()),
            intent: Some(Intent::Relationship),
            profile_score: Some(70.0),
        }
    }

    fn requester() -> Profile {
        Profile {
            id: Some("requester".to_string()),
            intent: Some(Intent::Relationship),
            profile_score: Some(70.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_age_ceiling() {
        let criteria = FilterCriteria { age: Some(30.0), ..Default::default() };
        assert!(passes_age(&candidate(), &criteria));

        let criteria = FilterCriteria { age: Some(28.0), ..Default::default() };
        assert!(passes_age(&candidate(), &criteria));

        let criteria = FilterCriteria { age: Some(25.0), ..Default::default() };
        assert!(!passes_age(&candidate(), &criteria));
    }

    #[test]
    fn test_age_has_no_lower_bound() {
        let young = Profile { age: Some(0.0), ..Default::default() };
        let criteria = FilterCriteria { age: Some(30.0), ..Default::default() };
        assert!(passes_age(&young, &criteria));
    }

    #[test]
    fn test_zero_age_criterion_is_active() {
        let criteria = FilterCriteria { age: Some(0.0), ..Default::default() };
        assert!(!passes_age(&candidate(), &criteria));
    }

    #[test]
    fn test_height_ceiling() {
        let criteria = FilterCriteria { height: Some("5'10\"".to_string()), ..Default::default() };
        assert!(passes_height(&candidate(), &criteria));

        let criteria = FilterCriteria { height: Some("5'06\"".to_string()), ..Default::default() };
        assert!(!passes_height(&candidate(), &criteria));
    }

    #[test]
    fn test_malformed_heights() {
        // Malformed candidate height parses to 0 and slips under any ceiling
        let mut unparsable = candidate();
        unparsable.height = Some("tall".to_string());
        let criteria = FilterCriteria { height: Some("5'00\"".to_string()), ..Default::default() };
        assert!(passes_height(&unparsable, &criteria));

        // Malformed ceiling parses to 0 and excludes every well-formed height
        let criteria = FilterCriteria { height: Some("tall".to_string()), ..Default::default() };
        assert!(!passes_height(&candidate(), &criteria));
    }

    #[test]
    fn test_marital_status_case_insensitive() {
        let criteria = FilterCriteria {
            marital_status: Some("  single ".to_string()),
            ..Default::default()
        };
        assert!(passes_marital_status(&candidate(), &criteria));

        let criteria = FilterCriteria {
            marital_status: Some("divorced".to_string()),
            ..Default::default()
        };
        assert!(!passes_marital_status(&candidate(), &criteria));

        let criteria = FilterCriteria {
            marital_status: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(passes_marital_status(&candidate(), &criteria));
    }

    #[test]
    fn test_location_case_sensitive() {
        let criteria = FilterCriteria { location: Some("Lagos".to_string()), ..Default::default() };
        assert!(passes_location(&candidate(), &criteria));

        let criteria = FilterCriteria { location: Some("lagos".to_string()), ..Default::default() };
        assert!(!passes_location(&candidate(), &criteria));
    }

    #[test]
    fn test_exact_tags_are_not_trimmed() {
        let criteria = FilterCriteria {
            location: Some("  ".to_string()),
            alcohol: Some("socially ".to_string()),
            ..Default::default()
        };
        assert!(!passes_location(&candidate(), &criteria));
        assert!(!passes_alcohol(&candidate(), &criteria));

        let criteria = FilterCriteria {
            location: Some(String::new()),
            smoking: Some(String::new()),
            ..Default::default()
        };
        assert!(passes_location(&candidate(), &criteria));
        assert!(passes_smoking(&candidate(), &criteria));
    }

    #[test]
    fn test_distance_ceiling() {
        let device = GeoPoint::new(6.4550, 3.3941); // ~8km from the candidate
        let near = FilterCriteria { distance: Some(20.0), ..Default::default() };
        let far = FilterCriteria { distance: Some(2.0), ..Default::default() };

        assert!(passes_distance(&candidate(), &near, Some(&device)));
        assert!(!passes_distance(&candidate(), &far, Some(&device)));
    }

    #[test]
    fn test_distance_needs_both_locations() {
        let criteria = FilterCriteria { distance: Some(1.0), ..Default::default() };
        let device = GeoPoint::new(51.5074, -0.1278);

        assert!(passes_distance(&candidate(), &criteria, None));

        let mut nowhere = candidate();
        nowhere.coordinates = None;
        assert!(passes_distance(&nowhere, &criteria, Some(&device)));
    }

    #[test]
    fn test_zero_distance_apart() {
        let device = candidate().coordinates.unwrap();
        let criteria = FilterCriteria { distance: Some(0.5), ..Default::default() };
        assert!(passes_distance(&candidate(), &criteria, Some(&device)));
    }

    #[test]
    fn test_habit_tags() {
        let criteria = FilterCriteria {
            alcohol: Some("socially".to_string()),
            smoking: Some("regularly".to_string()),
            ..Default::default()
        };
        assert!(passes_alcohol(&candidate(), &criteria));
        assert!(!passes_smoking(&candidate(), &criteria));
    }

    #[test]
    fn test_intent_equality() {
        let criteria = FilterCriteria { intent: Some(Intent::Relationship), ..Default::default() };
        assert!(passes_intent(&candidate(), &criteria));

        let criteria = FilterCriteria { intent: Some(Intent::Casual), ..Default::default() };
        assert!(!passes_intent(&candidate(), &criteria));
    }

    #[test]
    fn test_match_range() {
        let weights = ScoringWeights::default();
        let inside = FilterCriteria { match_range: Some(ScoreRange::new(90, 100)), ..Default::default() };
        let outside = FilterCriteria { match_range: Some(ScoreRange::new(0, 50)), ..Default::default() };

        assert!(passes_match_range(&requester(), &candidate(), &inside, &weights));
        assert!(!passes_match_range(&requester(), &candidate(), &outside, &weights));
    }

    #[test]
    fn test_match_range_skipped_without_score_inputs() {
        let weights = ScoringWeights::default();
        let criteria = FilterCriteria { match_range: Some(ScoreRange::new(99, 100)), ..Default::default() };

        let mut unscored = candidate();
        unscored.profile_score = None;
        assert!(passes_match_range(&requester(), &unscored, &criteria, &weights));

        let anonymous = Profile::default();
        assert!(passes_match_range(&anonymous, &candidate(), &criteria, &weights));
    }

    #[test]
    fn test_empty_criteria_pass_everything() {
        let weights = ScoringWeights::default();
        assert!(matches_criteria(
            &requester(),
            &candidate(),
            &FilterCriteria::default(),
            None,
            &weights,
        ));
        assert!(matches_criteria(
            &requester(),
            &Profile::default(),
            &FilterCriteria::default(),
            None,
            &weights,
        ));
    }

    #[test]
    fn test_all_criteria_together() {
        let weights = ScoringWeights::default();
        let device = GeoPoint::new(6.4550, 3.3941);
        let criteria = FilterCriteria {
            age: Some(30.0),
            height: Some("6'0\"".to_string()),
            marital_status: Some("single".to_string()),
            location: Some("Lagos".to_string()),
            distance: Some(25.0),
            alcohol: Some("socially".to_string()),
            smoking: Some("never".to_string()),
            intent: Some(Intent::Relationship),
            match_range: Some(ScoreRange::new(80, 100)),
        };

        assert!(matches_criteria(&requester(), &candidate(), &criteria, Some(&device), &weights));

        let mut smoker = candidate();
        smoker.smoking = Some("sometimes".to_string());
        assert!(!matches_criteria(&requester(), &smoker, &criteria, Some(&device), &weights));
    }
}
