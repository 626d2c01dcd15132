// Route exports
pub mod health;
pub mod jobs;
pub mod session;
pub mod skills;

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::config::CacheSettings;
use crate::core::Matcher;
use crate::models::{AuthenticatedUser, ErrorResponse};
use crate::services::{AuthError, CatalogCache, JwtVerifier, StoreError, Stores};
use crate::session::SkillEditor;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub catalog: Arc<CatalogCache>,
    pub editor: Arc<SkillEditor>,
    pub verifier: Arc<JwtVerifier>,
    pub matcher: Matcher,
}

impl AppState {
    pub fn new(stores: Stores, verifier: JwtVerifier, matcher: Matcher, cache: &CacheSettings) -> Self {
        let catalog = Arc::new(CatalogCache::new(stores.catalog.clone(), cache.catalog_ttl_secs));
        let editor = Arc::new(SkillEditor::new(stores.skills.clone(), cache.lock_prune_threshold));

        Self {
            stores,
            catalog,
            editor,
            verifier: Arc::new(verifier),
            matcher,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(session::configure)
            .configure(skills::configure)
            .configure(jobs::configure),
    );
}

fn authorization_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Verify the caller's bearer token, or build the 401 response
pub(crate) fn authenticate(state: &AppState, req: &HttpRequest) -> Result<AuthenticatedUser, HttpResponse> {
    state
        .verifier
        .verify_header(authorization_header(req))
        .map_err(|e| unauthorized(&e))
}

/// Like `authenticate`, but a request without a token is anonymous
pub(crate) fn authenticate_optional(
    state: &AppState,
    req: &HttpRequest,
) -> Result<Option<AuthenticatedUser>, HttpResponse> {
    match state.verifier.verify_header(authorization_header(req)) {
        Ok(user) => Ok(Some(user)),
        Err(AuthError::MissingToken) => Ok(None),
        Err(e) => Err(unauthorized(&e)),
    }
}

fn unauthorized(error: &AuthError) -> HttpResponse {
    tracing::info!("Rejected request: {}", error);
    HttpResponse::Unauthorized().json(ErrorResponse::new("unauthorized", error.to_string(), 401))
}

/// Map a collaborator failure to a non-fatal error response
pub(crate) fn store_error_response(error: &str, message: &str, e: &StoreError) -> HttpResponse {
    match e {
        StoreError::Conflict(_) => {
            tracing::warn!("{}: {}", message, e);
            HttpResponse::Conflict().json(ErrorResponse::new(error, e.to_string(), 409))
        }
        StoreError::NotFound(_) => {
            tracing::warn!("{}: {}", message, e);
            HttpResponse::NotFound().json(ErrorResponse::new(error, e.to_string(), 404))
        }
        _ => {
            tracing::error!("{}: {}", message, e);
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(error, message, 503))
        }
    }
}
