use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use super::{authenticate, store_error_response, AppState};
use crate::models::{ErrorResponse, JobMatchesResponse, MatchSkillsRequest};
use crate::session::SessionContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/jobs/matches", web::get().to(my_matches))
        .route("/jobs/match", web::post().to(match_skills));
}

/// Matches for the caller's stored skills
///
/// GET /api/v1/jobs/matches
///
/// Skills and the catalog are fetched concurrently; matching only runs
/// once both loaded successfully.
async fn my_matches(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let user = match authenticate(&state, &http_req) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let user_id = user.id.clone();

    let (session, jobs) = tokio::join!(
        SessionContext::load(user, state.stores.skills.as_ref()),
        state.catalog.active_jobs(),
    );

    let session = match session {
        Ok(session) => session,
        Err(e) => return store_error_response("skills_unavailable", "Could not load skills", &e),
    };

    let jobs = match jobs {
        Ok(jobs) => jobs,
        Err(e) => return store_error_response("jobs_unavailable", "Could not load jobs", &e),
    };

    let report = state.matcher.find_matches(session.skills.names(), jobs.as_slice());

    tracing::info!(
        "Returning {} matches for user {} (from {} postings)",
        report.matches.len(),
        user_id,
        report.total_postings
    );

    HttpResponse::Ok().json(JobMatchesResponse {
        skills: session.skills.names().map(str::to_string).collect(),
        matches: report.matches,
        total_postings: report.total_postings,
    })
}

/// Match an explicit skill list
///
/// POST /api/v1/jobs/match
///
/// Request body:
/// ```json
/// { "skills": ["Java", "SQL", "React"] }
/// ```
async fn match_skills(
    state: web::Data<AppState>,
    req: web::Json<MatchSkillsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let jobs = match state.catalog.active_jobs().await {
        Ok(jobs) => jobs,
        Err(e) => return store_error_response("jobs_unavailable", "Could not load jobs", &e),
    };

    let report = state.matcher.find_matches(&req.skills, jobs.as_slice());

    HttpResponse::Ok().json(JobMatchesResponse {
        skills: req.skills.clone(),
        matches: report.matches,
        total_postings: report.total_postings,
    })
}
