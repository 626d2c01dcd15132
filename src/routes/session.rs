use actix_web::{web, HttpRequest, HttpResponse, Responder};

use super::{authenticate_optional, AppState};
use crate::models::NavigationQuery;
use crate::session::{navigation, SessionState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/navigation", web::get().to(get_navigation));
}

/// Navigation descriptor endpoint
///
/// GET /api/v1/navigation?path=/jobs
///
/// Works with or without a bearer token; an invalid token is rejected
/// rather than silently treated as logged out.
async fn get_navigation(
    state: web::Data<AppState>,
    query: web::Query<NavigationQuery>,
    http_req: HttpRequest,
) -> impl Responder {
    let user = match authenticate_optional(&state, &http_req) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let session_state = match user {
        None => SessionState::Anonymous,
        Some(user) => {
            let profile = match state.stores.profiles.get_profile(&user.id).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!("Failed to fetch profile for {}, using fallback name: {}", user.id, e);
                    None
                }
            };
            SessionState::authenticated(&user, profile.as_ref())
        }
    };

    HttpResponse::Ok().json(navigation(&session_state, &query.path))
}
