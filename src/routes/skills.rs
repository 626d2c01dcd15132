use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use super::{authenticate, store_error_response, AppState};
use crate::models::{AddSkillRequest, ErrorResponse, SkillEditResponse, SkillListResponse};
use crate::session::{SessionContext, SkillEdit};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/skills", web::get().to(list_skills))
        .route("/skills", web::post().to(add_skill))
        .route("/skills/{name}", web::delete().to(remove_skill));
}

fn edit_response(edit: &SkillEdit, session: SessionContext) -> SkillEditResponse {
    SkillEditResponse {
        outcome: edit.label().to_string(),
        skill: edit.skill().cloned(),
        skills: session.skills.into_vec(),
    }
}

/// List the caller's skills
///
/// GET /api/v1/skills
async fn list_skills(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let user = match authenticate(&state, &http_req) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match SessionContext::load(user, state.stores.skills.as_ref()).await {
        Ok(session) => {
            let skills = session.skills.into_vec();
            HttpResponse::Ok().json(SkillListResponse {
                count: skills.len(),
                skills,
            })
        }
        Err(e) => store_error_response("skills_unavailable", "Could not load skills", &e),
    }
}

/// Add a skill
///
/// POST /api/v1/skills
///
/// Request body:
/// ```json
/// { "name": "Rust" }
/// ```
async fn add_skill(
    state: web::Data<AppState>,
    req: web::Json<AddSkillRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let user = match authenticate(&state, &http_req) {
        Ok(user) => user,
        Err(response) => return response,
    };

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for add_skill request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let mut session = SessionContext::new(user);

    match state.editor.add_skill(&mut session, &req.name).await {
        Ok(edit) => {
            let body = edit_response(&edit, session);
            match edit {
                SkillEdit::Added(_) => HttpResponse::Created().json(body),
                _ => HttpResponse::Ok().json(body),
            }
        }
        Err(e) => store_error_response("skill_update_failed", "Could not add skill", &e),
    }
}

/// Remove a skill by name, matched ignoring case
///
/// DELETE /api/v1/skills/{name}
async fn remove_skill(
    state: web::Data<AppState>,
    path: web::Path<String>,
    http_req: HttpRequest,
) -> impl Responder {
    let user = match authenticate(&state, &http_req) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let name = path.into_inner();
    let mut session = SessionContext::new(user);

    match state.editor.remove_skill(&mut session, &name).await {
        Ok(edit) => HttpResponse::Ok().json(edit_response(&edit, session)),
        Err(e) => store_error_response("skill_update_failed", "Could not remove skill", &e),
    }
}
