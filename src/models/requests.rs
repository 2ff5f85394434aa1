use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{deserialize_lenient_geo_point, FilterCriteria, GeoPoint, Profile};

/// Upper bound on the candidate pool accepted in a single request
pub const MAX_POOL_SIZE: u64 = 10_000;

/// Request to filter a candidate pool
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FilterCandidatesRequest {
    pub requester: Profile,
    #[validate(length(max = MAX_POOL_SIZE))]
    #[serde(default)]
    pub candidates: Vec<Profile>,
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(
        alias = "device_location",
        rename = "deviceLocation",
        default,
        deserialize_with = "deserialize_lenient_geo_point"
    )]
    pub device_location: Option<GeoPoint>,
}

/// Request to rank a candidate pool for the discovery feed
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    pub requester: Profile,
    #[validate(length(max = MAX_POOL_SIZE))]
    #[serde(default)]
    pub candidates: Vec<Profile>,
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(
        alias = "device_location",
        rename = "deviceLocation",
        default,
        deserialize_with = "deserialize_lenient_geo_point"
    )]
    pub device_location: Option<GeoPoint>,
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
}

/// Request to score a single pair of profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePairRequest {
    #[serde(alias = "user_a", rename = "userA")]
    pub user_a: Profile,
    #[serde(alias = "user_b", rename = "userB")]
    pub user_b: Profile,
}
