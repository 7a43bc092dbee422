use actix_web::{http::StatusCode, web, HttpResponse};

use crate::api::outcome_status;
use crate::models::{ActionOutcome, ProfileUpdate, User};
use crate::services::account_service;
use crate::state::AppState;

#[utoipa::path(
    patch,
    path = "/api/v1/profile",
    tag = "Profile",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = ActionOutcome),
        (status = 401, description = "Not signed in")
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn update_profile(
    state: web::Data<AppState>,
    user: web::ReqData<User>,
    request: web::Json<ProfileUpdate>,
) -> HttpResponse {
    log::info!("✏️  PATCH /profile - uid: {}", user.id);

    let outcome = account_service::update_user_profile(state.users.as_ref(), &user.id, &request).await;
    HttpResponse::build(outcome_status(&outcome, StatusCode::OK)).json(outcome)
}
