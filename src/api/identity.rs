use actix_web::{web, HttpResponse};

use crate::api::error_response;
use crate::models::{CreateAccountRequest, IdentityTokenResponse, PasswordSignInRequest};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/identity/accounts",
    tag = "Identity",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = IdentityTokenResponse),
        (status = 409, description = "Email already in use"),
        (status = 400, description = "Invalid email or password")
    )
)]
pub async fn create_account(state: web::Data<AppState>, request: web::Json<CreateAccountRequest>) -> HttpResponse {
    log::info!("🆕 POST /identity/accounts - email: {}", request.email);

    match state
        .credentials
        .register_account(&request.email, &request.password, request.display_name.as_deref())
        .await
    {
        Ok((account, id_token)) => HttpResponse::Created().json(IdentityTokenResponse {
            success: true,
            uid: account.uid,
            id_token,
        }),
        Err(e) => {
            log::warn!("❌ Account creation failed: {} - {}", request.email, e);
            error_response(&e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/identity/token",
    tag = "Identity",
    request_body = PasswordSignInRequest,
    responses(
        (status = 200, description = "Identity token issued", body = IdentityTokenResponse),
        (status = 401, description = "Wrong email or password, or account disabled")
    )
)]
pub async fn password_sign_in(state: web::Data<AppState>, request: web::Json<PasswordSignInRequest>) -> HttpResponse {
    log::info!("🔑 POST /identity/token - email: {}", request.email);

    match state.credentials.sign_in_with_password(&request.email, &request.password).await {
        Ok((uid, id_token)) => HttpResponse::Ok().json(IdentityTokenResponse {
            success: true,
            uid,
            id_token,
        }),
        Err(e) => {
            log::warn!("❌ Password sign-in failed: {} - {}", request.email, e);
            error_response(&e)
        }
    }
}
