pub mod auth;
pub mod health;
pub mod identity;
pub mod interviews;
pub mod profile;
pub mod swagger;

use actix_web::{http::StatusCode, web, HttpResponse};

use crate::middleware::RequireSession;
use crate::models::{ActionOutcome, FailureKind};
use crate::services::account_service::EMAIL_IN_USE;
use crate::utils::AppError;

/// Registers every route. Shared by `main` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Identity provider (issues identity tokens)
        .service(
            web::scope("/api/v1/identity")
                .route("/accounts", web::post().to(identity::create_account))
                .route("/token", web::post().to(identity::password_sign_in)),
        )
        // Session lifecycle
        .service(
            web::scope("/api/v1/auth")
                .route("/sign-up", web::post().to(auth::sign_up))
                .route("/register", web::post().to(auth::register))
                .route("/sign-in", web::post().to(auth::sign_in))
                .route("/sign-out", web::post().to(auth::sign_out))
                .route("/me", web::get().to(auth::me))
                .route("/status", web::get().to(auth::status))
                .service(
                    web::resource("/revoke")
                        .wrap(RequireSession)
                        .route(web::post().to(auth::revoke)),
                ),
        )
        .service(
            web::scope("/api/v1/profile")
                .wrap(RequireSession)
                .route("", web::patch().to(profile::update_profile)),
        )
        .service(
            web::scope("/api/v1/interviews")
                .route("/home", web::get().to(interviews::home))
                .service(
                    web::resource("/{id}/feedback")
                        .wrap(RequireSession)
                        .route(web::get().to(interviews::get_feedback)),
                )
                .route("/{id}", web::get().to(interviews::get_interview)),
        );
}

fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Conflict => StatusCode::CONFLICT,
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::InvalidCredential => StatusCode::UNAUTHORIZED,
        FailureKind::InvalidRequest => StatusCode::BAD_REQUEST,
        FailureKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status for an outcome: `success_status` on success, else by failure kind.
pub fn outcome_status(outcome: &ActionOutcome, success_status: StatusCode) -> StatusCode {
    match outcome.failure {
        _ if outcome.success => success_status,
        Some(kind) => status_for(kind),
        None => StatusCode::BAD_REQUEST,
    }
}

/// JSON error body for a failed service call. Storage details stay in the logs.
pub fn error_response(err: &AppError) -> HttpResponse {
    let message = match err {
        AppError::EmailAlreadyExists(_) => EMAIL_IN_USE.to_string(),
        AppError::DatabaseError(_) | AppError::Internal(_) => "Internal server error".to_string(),
        AppError::Unavailable(_) => "Service temporarily unavailable".to_string(),
        other => other.to_string(),
    };

    HttpResponse::build(status_for(FailureKind::from(err))).json(serde_json::json!({
        "success": false,
        "error": message
    }))
}
