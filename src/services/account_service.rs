use crate::database::UserStore;
use crate::models::{
    ActionOutcome, FailureKind, ProfileUpdate, RegisterParams, SignInParams, SignUpParams, UserDocument,
};
use crate::services::credential_store::{CredentialStore, JwtCredentialStore};
use crate::services::session_service::{SessionContext, SessionManager};
use crate::utils::{iso_now, AppError};

pub const USER_EXISTS: &str = "User already exists. Please sign in.";
pub const ACCOUNT_CREATED: &str = "Account created successfully. Please sign in.";
pub const EMAIL_IN_USE: &str = "This email is already in use";
pub const SIGN_UP_FAILED: &str = "Failed to create account. Please try again.";
pub const USER_MISSING: &str = "User does not exist. Create an account.";
pub const SIGNED_IN: &str = "Successfully signed in.";
pub const SIGN_IN_FAILED: &str = "Failed to log into account. Please try again.";
pub const PROFILE_UPDATED: &str = "Profile updated successfully.";
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile. Please try again.";

fn sign_up_failure(err: &AppError) -> ActionOutcome {
    match err {
        AppError::Conflict(_) => ActionOutcome::fail(FailureKind::Conflict, USER_EXISTS),
        AppError::EmailAlreadyExists(_) => ActionOutcome::fail(FailureKind::Conflict, EMAIL_IN_USE),
        other => ActionOutcome::fail(FailureKind::from(other), SIGN_UP_FAILED),
    }
}

/// Creates the user record for a credential store account. Does not sign in.
pub async fn sign_up(users: &dyn UserStore, params: &SignUpParams) -> ActionOutcome {
    match try_sign_up(users, params).await {
        Ok(()) => {
            log::info!("✅ User created: {} ({})", params.email, params.uid);
            ActionOutcome::ok(ACCOUNT_CREATED)
        }
        Err(e) => {
            log::error!("❌ Error creating user {}: {}", params.uid, e);
            sign_up_failure(&e)
        }
    }
}

async fn try_sign_up(users: &dyn UserStore, params: &SignUpParams) -> Result<(), AppError> {
    // Friendly fast path; the insert itself rejects a concurrent duplicate.
    if users.find_user(&params.uid).await?.is_some() {
        return Err(AppError::Conflict(format!("User {} already exists", params.uid)));
    }

    let record = UserDocument {
        id: params.uid.clone(),
        name: params.name.clone(),
        email: params.email.clone(),
        profile_url: params.profile_url.clone().filter(|url| !url.is_empty()),
        resume_url: None,
        created_at: iso_now(),
        updated_at: None,
    };
    users.create_user(&record).await
}

/// Creates the credential store account, then the user record.
pub async fn register(identity: &JwtCredentialStore, users: &dyn UserStore, params: &RegisterParams) -> ActionOutcome {
    let account = match identity
        .register_account(&params.email, &params.password, Some(&params.name))
        .await
    {
        Ok((account, _)) => account,
        Err(e) => {
            log::error!("❌ Error registering {}: {}", params.email, e);
            return match e {
                AppError::InvalidRequest(msg) => ActionOutcome::fail(FailureKind::InvalidRequest, msg),
                other => sign_up_failure(&other),
            };
        }
    };

    sign_up(
        users,
        &SignUpParams {
            uid: account.uid,
            name: params.name.clone(),
            email: account.email,
            profile_url: params.profile_url.clone(),
        },
    )
    .await
}

/// Checks the account exists, then issues a session cookie on `ctx`.
pub async fn sign_in(
    sessions: &SessionManager,
    credentials: &dyn CredentialStore,
    ctx: &mut SessionContext,
    params: &SignInParams,
) -> ActionOutcome {
    match credentials.get_user_by_email(&params.email).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            log::warn!("⚠️  Sign-in for unknown email: {}", params.email);
            return ActionOutcome::fail(FailureKind::NotFound, USER_MISSING);
        }
        Err(e) => {
            log::error!("❌ Error signing in {}: {}", params.email, e);
            return ActionOutcome::fail(FailureKind::from(&e), SIGN_IN_FAILED);
        }
    }

    match sessions.issue_session(ctx, &params.id_token).await {
        Ok(()) => {
            log::info!("✅ Signed in: {}", params.email);
            ActionOutcome::ok(SIGNED_IN)
        }
        Err(e) => {
            log::error!("❌ Error signing in {}: {}", params.email, e);
            ActionOutcome::fail(FailureKind::from(&e), SIGN_IN_FAILED)
        }
    }
}

pub fn sign_out(sessions: &SessionManager, ctx: &mut SessionContext) {
    sessions.clear_session(ctx);
}

/// Writes only the supplied fields and stamps `updatedAt`.
pub async fn update_user_profile(users: &dyn UserStore, user_id: &str, update: &ProfileUpdate) -> ActionOutcome {
    if update.is_empty() {
        log::debug!("Profile update for {} has no fields; stamping updatedAt only", user_id);
    }

    match users.update_user(user_id, update, &iso_now()).await {
        Ok(()) => {
            log::info!("✅ Profile updated: {}", user_id);
            ActionOutcome::ok(PROFILE_UPDATED)
        }
        Err(e) => {
            log::error!("❌ Error updating user profile {}: {}", user_id, e);
            ActionOutcome::fail(FailureKind::from(&e), PROFILE_UPDATE_FAILED)
        }
    }
}
