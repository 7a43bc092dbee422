use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use crate::api::{error_response, outcome_status};
use crate::models::{ActionOutcome, RegisterParams, SignInParams, SignUpParams, User};
use crate::services::{account_service, SessionContext};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    tag = "Auth",
    request_body = SignUpParams,
    responses(
        (status = 201, description = "User record created", body = ActionOutcome),
        (status = 409, description = "User already exists", body = ActionOutcome)
    )
)]
pub async fn sign_up(state: web::Data<AppState>, request: web::Json<SignUpParams>) -> HttpResponse {
    log::info!("📝 POST /auth/sign-up - uid: {}, email: {}", request.uid, request.email);

    let outcome = account_service::sign_up(state.users.as_ref(), &request).await;
    HttpResponse::build(outcome_status(&outcome, StatusCode::CREATED)).json(outcome)
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterParams,
    responses(
        (status = 201, description = "Account and user record created", body = ActionOutcome),
        (status = 409, description = "Email already in use", body = ActionOutcome)
    )
)]
pub async fn register(state: web::Data<AppState>, request: web::Json<RegisterParams>) -> HttpResponse {
    log::info!("📝 POST /auth/register - email: {}", request.email);

    let outcome = account_service::register(&state.credentials, state.users.as_ref(), &request).await;
    HttpResponse::build(outcome_status(&outcome, StatusCode::CREATED)).json(outcome)
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    tag = "Auth",
    request_body = SignInParams,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = ActionOutcome),
        (status = 404, description = "No account for this email", body = ActionOutcome),
        (status = 401, description = "Identity token rejected", body = ActionOutcome)
    )
)]
pub async fn sign_in(req: HttpRequest, state: web::Data<AppState>, request: web::Json<SignInParams>) -> HttpResponse {
    log::info!("🔐 POST /auth/sign-in - email: {}", request.email);

    let mut ctx = SessionContext::from_request(&req);
    let outcome =
        account_service::sign_in(&state.sessions, state.credentials.as_ref(), &mut ctx, &request).await;

    let mut builder = HttpResponse::build(outcome_status(&outcome, StatusCode::OK));
    ctx.apply(&mut builder);
    builder.json(outcome)
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    tag = "Auth",
    responses(
        (status = 204, description = "Session cookie removed")
    )
)]
pub async fn sign_out(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    log::info!("👋 POST /auth/sign-out");

    let mut ctx = SessionContext::from_request(&req);
    account_service::sign_out(&state.sessions, &mut ctx);

    let mut builder = HttpResponse::NoContent();
    ctx.apply(&mut builder);
    builder.finish()
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user, or null when signed out")
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let ctx = SessionContext::from_request(&req);
    let user = state.sessions.current_user(&ctx).await;

    HttpResponse::Ok().json(serde_json::json!({ "user": user }))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/status",
    tag = "Auth",
    responses(
        (status = 200, description = "Whether the session cookie resolves to a user")
    )
)]
pub async fn status(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let ctx = SessionContext::from_request(&req);
    let authenticated = state.sessions.is_authenticated(&ctx).await;

    HttpResponse::Ok().json(serde_json::json!({ "authenticated": authenticated }))
}

/// Revokes every session of the signed-in user and drops the cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/revoke",
    tag = "Auth",
    responses(
        (status = 200, description = "All sessions revoked", body = ActionOutcome),
        (status = 401, description = "Not signed in")
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn revoke(req: HttpRequest, state: web::Data<AppState>, user: web::ReqData<User>) -> HttpResponse {
    log::info!("🔒 POST /auth/revoke - uid: {}", user.id);

    if let Err(e) = state.credentials.revoke_sessions(&user.id).await {
        log::error!("❌ Failed to revoke sessions for {}: {}", user.id, e);
        return error_response(&e);
    }

    let mut ctx = SessionContext::from_request(&req);
    account_service::sign_out(&state.sessions, &mut ctx);

    let mut builder = HttpResponse::Ok();
    ctx.apply(&mut builder);
    builder.json(ActionOutcome::ok("Signed out of all sessions."))
}
