use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{
    ErrorResponse, FilterCandidatesRequest, FilterCandidatesResponse, HealthResponse,
    RankCandidatesRequest, RankCandidatesResponse, ScorePairRequest, ScorePairResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/candidates/filter", web::post().to(filter_candidates))
        .route("/matches/score", web::post().to(score_pair))
        .route("/matches/rank", web::post().to(rank_candidates));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Filter candidates endpoint
///
/// POST /api/v1/candidates/filter
///
/// Request body:
/// ```json
/// {
///   "requester": { "intent": "relationship", "profileScore": 80 },
///   "candidates": [{ "userId": "string", "age": 27, "height": "5'08\"" }],
///   "criteria": { "age": 30, "distance": 25, "matchRange": "50-100" },
///   "deviceLocation": { "latitude": 6.45, "longitude": 3.39 }
/// }
/// ```
async fn filter_candidates(
    state: web::Data<AppState>,
    req: web::Json<FilterCandidatesRequest>,
) -> impl Responder {
    if let Err(response) = validate_pool(&*req, req.candidates.len(), &state.matching) {
        return response;
    }

    let candidates = state.matcher.filter_candidates(
        &req.requester,
        &req.candidates,
        &req.criteria,
        req.device_location.as_ref(),
    );

    tracing::info!(
        "Filtered {} of {} candidates",
        candidates.len(),
        req.candidates.len()
    );

    HttpResponse::Ok().json(FilterCandidatesResponse {
        total: candidates.len(),
        candidates,
    })
}

/// Score a pair of profiles
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "userA": { "intent": "relationship", "profileScore": 80 },
///   "userB": { "intent": "casual", "profileScore": 20 }
/// }
/// ```
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScorePairRequest>,
) -> impl Responder {
    let score = state.matcher.score(&req.user_a, &req.user_b);

    tracing::debug!("Scored pair {:?} / {:?}: {}", req.user_a.id, req.user_b.id, score);

    HttpResponse::Ok().json(ScorePairResponse { score })
}

/// Rank candidates for the discovery feed
///
/// POST /api/v1/matches/rank
///
/// Same body as the filter endpoint plus an optional `limit`.
async fn rank_candidates(
    state: web::Data<AppState>,
    req: web::Json<RankCandidatesRequest>,
) -> impl Responder {
    if let Err(response) = validate_pool(&*req, req.candidates.len(), &state.matching) {
        return response;
    }

    // Cap limit to keep responses small
    let limit = req
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit) as usize;

    let result = state.matcher.rank_candidates(
        &req.requester,
        &req.candidates,
        &req.criteria,
        req.device_location.as_ref(),
        limit,
    );

    tracing::info!(
        "Returning {} matches for {:?} (from {} candidates)",
        result.matches.len(),
        req.requester.id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RankCandidatesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

fn validate_pool<T: Validate>(
    req: &T,
    pool_size: usize,
    matching: &MatchingSettings,
) -> Result<(), HttpResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed: field_errors={:?}", errors);
        return Err(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }));
    }

    if pool_size > matching.max_candidates {
        tracing::info!(
            "Rejecting pool of {} candidates (max {})",
            pool_size,
            matching.max_candidates
        );
        return Err(HttpResponse::PayloadTooLarge().json(ErrorResponse {
            error: "Too many candidates".to_string(),
            message: format!(
                "At most {} candidates can be processed per request",
                matching.max_candidates
            ),
            status_code: 413,
        }));
    }

    Ok(())
}
