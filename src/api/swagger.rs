use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Interview Prep Service API",
        version = "1.0.0",
        description = "Session authentication, account lifecycle and interview data for the interview prep app.\n\n**Authentication:** obtain an identity token from `/api/v1/identity/token`, exchange it at `/api/v1/auth/sign-in` for an HTTP-only `session` cookie, then call protected endpoints with that cookie."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Identity
        crate::api::identity::create_account,
        crate::api::identity::password_sign_in,

        // Auth
        crate::api::auth::sign_up,
        crate::api::auth::register,
        crate::api::auth::sign_in,
        crate::api::auth::sign_out,
        crate::api::auth::me,
        crate::api::auth::status,
        crate::api::auth::revoke,

        // Profile
        crate::api::profile::update_profile,

        // Interviews
        crate::api::interviews::home,
        crate::api::interviews::get_interview,
        crate::api::interviews::get_feedback,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::CreateAccountRequest,
            crate::models::PasswordSignInRequest,
            crate::models::IdentityTokenResponse,
            crate::models::AccountInfo,
            crate::models::SignUpParams,
            crate::models::SignInParams,
            crate::models::RegisterParams,
            crate::models::ProfileUpdate,
            crate::models::User,
            crate::models::ActionOutcome,
            crate::models::Interview,
            crate::models::Feedback,
            crate::models::CategoryScore,
            crate::models::InterviewOverview,
        )
    ),
    tags(
        (name = "Health", description = "Service and database health."),
        (name = "Identity", description = "Password accounts and short-lived identity tokens."),
        (name = "Auth", description = "Session cookie lifecycle: sign up, sign in, sign out, current user."),
        (name = "Profile", description = "Signed-in user's profile."),
        (name = "Interviews", description = "Practice interviews and feedback."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "session",
                    "HTTP-only session cookie set by sign-in",
                ))),
            );
        }
    }
}
