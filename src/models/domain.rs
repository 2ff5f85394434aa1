use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Relationship goal a user states on their profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Casual,
    Relationship,
    Marriage,
    NotSure,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Casual => "casual",
            Intent::Relationship => "relationship",
            Intent::Marriage => "marriage",
            Intent::NotSure => "not_sure",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown intent tag: {0}")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "casual" => Ok(Intent::Casual),
            "relationship" => Ok(Intent::Relationship),
            "marriage" => Ok(Intent::Marriage),
            "not_sure" => Ok(Intent::NotSure),
            other => Err(UnknownIntent(other.to_string())),
        }
    }
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Profile of a requester or a candidate
///
/// Every field is optional. A missing field disables the predicates that
/// read it instead of failing the candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(
        default,
        alias = "userId",
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub age: Option<f64>,
    /// Height as a `F'II"` string, e.g. `5'06"`
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub height: Option<String>,
    #[serde(rename = "maritalStatus", default, deserialize_with = "deserialize_lenient_string")]
    pub marital_status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_geo_point")]
    pub coordinates: Option<GeoPoint>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub alcohol: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub smoking: Option<String>,
    #[serde(default, alias = "relationshipType", deserialize_with = "deserialize_lenient_intent")]
    pub intent: Option<Intent>,
    #[serde(rename = "profileScore", default, deserialize_with = "deserialize_lenient_number")]
    pub profile_score: Option<f64>,
}

/// Inclusive `min-max` bounds on the match score, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRange {
    pub min: i32,
    pub max: i32,
}

impl ScoreRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, score: u8) -> bool {
        let score = i32::from(score);
        score >= self.min && score <= self.max
    }
}

/// Errors from parsing a `min-max` score range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreRangeError {
    #[error("missing '-' separator in range: {0}")]
    MissingSeparator(String),

    #[error("invalid bound in range {range}: {bound}")]
    InvalidBound { range: String, bound: String },
}

impl FromStr for ScoreRange {
    type Err = ScoreRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| ScoreRangeError::MissingSeparator(s.to_string()))?;

        let parse_bound = |bound: &str| {
            bound
                .trim()
                .parse::<i32>()
                .map_err(|_| ScoreRangeError::InvalidBound {
                    range: s.to_string(),
                    bound: bound.to_string(),
                })
        };

        Ok(Self {
            min: parse_bound(min)?,
            max: parse_bound(max)?,
        })
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl Serialize for ScoreRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Filter criteria supplied by the discovery filter panel
///
/// Each field is an independent criterion; `None` switches it off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Maximum age
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub age: Option<f64>,
    /// Maximum height as a `F'II"` string
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub height: Option<String>,
    #[serde(rename = "maritalStatus", default, deserialize_with = "deserialize_lenient_string")]
    pub marital_status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub location: Option<String>,
    /// Maximum distance from the device in kilometers
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub alcohol: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub smoking: Option<String>,
    #[serde(default, alias = "relationshipType", deserialize_with = "deserialize_lenient_intent")]
    pub intent: Option<Intent>,
    #[serde(
        rename = "matchRange",
        alias = "interestRange",
        default,
        deserialize_with = "deserialize_score_range",
        skip_serializing_if = "Option::is_none"
    )]
    pub match_range: Option<ScoreRange>,
}

impl FilterCriteria {
    /// True when no criterion is switched on
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Weights applied to the two match score components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub intent: f64,
    pub similarity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            intent: 0.4,
            similarity: 0.6,
        }
    }
}

/// A candidate that survived filtering, with its score against the requester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// Accepts a JSON number or a numeric string; anything else reads as absent.
fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

/// Keeps string values only; any other JSON type reads as absent.
fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        _ => None,
    }))
}

/// A coordinate pair whose latitude and longitude are both numeric, or absent.
pub(crate) fn deserialize_lenient_geo_point<'de, D>(deserializer: D) -> Result<Option<GeoPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(fields)) = value else {
        return Ok(None);
    };

    let coordinate = |key: &str| match fields.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(coordinate("latitude")
        .zip(coordinate("longitude"))
        .map(|(latitude, longitude)| GeoPoint::new(latitude, longitude)))
}

fn deserialize_lenient_intent<'de, D>(deserializer: D) -> Result<Option<Intent>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v.as_str().map(str::parse::<Intent>) {
        Some(Ok(intent)) => Some(intent),
        Some(Err(e)) => {
            tracing::debug!("Ignoring intent: {}", e);
            None
        }
        None => None,
    }))
}

fn deserialize_score_range<'de, D>(deserializer: D) -> Result<Option<ScoreRange>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::String(raw)) = value else {
        return Ok(None);
    };

    if raw.trim().is_empty() {
        return Ok(None);
    }

    match raw.parse::<ScoreRange>() {
        Ok(range) => Ok(Some(range)),
        Err(e) => {
            tracing::debug!("Ignoring match range criterion: {}", e);
            Ok(None)
        }
    }
}
