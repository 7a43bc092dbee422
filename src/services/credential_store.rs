use async_trait::async_trait;
use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::database::AccountStore;
use crate::models::{Account, AccountInfo};
use crate::utils::{iso_now, AppError, CredentialFault};

/// Shortest and longest session lifetimes `create_session_cookie` accepts.
pub const MIN_SESSION_DURATION_SECS: i64 = 5 * 60;
pub const MAX_SESSION_DURATION_SECS: i64 = 14 * 24 * 60 * 60;

/// Claims of a verified session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSession {
    pub uid: String,
    pub email: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// The external credential service: exchanges identity tokens for session
/// cookies, verifies them, and looks up accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create_session_cookie(&self, id_token: &str, expires_in: Duration) -> Result<String, AppError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<AccountInfo>, AppError>;

    /// With `check_revoked`, also rejects sessions of disabled or deleted
    /// accounts and sessions issued before the account's last revocation.
    async fn verify_session_cookie(&self, session_cookie: &str, check_revoked: bool) -> Result<DecodedSession, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Identity,
    Session,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub kind: TokenKind,
    pub iat: i64,
    /// Issue time in Unix milliseconds, compared against `tokensValidAfter`.
    pub iat_ms: i64,
    pub exp: i64,
    pub jti: String,
    pub aud: String,
    pub iss: String,
}

/// Self-hosted credential store: HS256 tokens over an [`AccountStore`].
pub struct JwtCredentialStore {
    accounts: Arc<dyn AccountStore>,
    secret: String,
    issuer: String,
    audience: String,
    identity_token_ttl: Duration,
    hash_cost: u32,
}

impl JwtCredentialStore {
    pub fn new(accounts: Arc<dyn AccountStore>, config: &AppConfig) -> Self {
        Self {
            accounts,
            secret: config.jwt_secret.clone(),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            identity_token_ttl: Duration::seconds(config.identity_token_ttl_secs),
            hash_cost: config.bcrypt_cost,
        }
    }

    /// Creates an account and returns it with a fresh identity token.
    pub async fn register_account(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<(AccountInfo, String), AppError> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::InvalidRequest("A valid email is required".to_string()));
        }
        if password.len() < 6 {
            return Err(AppError::InvalidRequest("Password must be at least 6 characters".to_string()));
        }

        let account = Account {
            uid: Uuid::new_v4().simple().to_string(),
            email,
            password_hash: hash(password, self.hash_cost)?,
            display_name: display_name.map(str::to_string),
            disabled: false,
            tokens_valid_after: None,
            created_at: iso_now(),
        };
        self.accounts.insert_account(&account).await?;

        log::info!("✅ Account registered: {} ({})", account.email, account.uid);

        let id_token = self.mint(&account.uid, &account.email, TokenKind::Identity, Utc::now(), self.identity_token_ttl)?;
        Ok((AccountInfo::from(&account), id_token))
    }

    /// Password login; returns the account uid and an identity token.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(String, String), AppError> {
        let account = self
            .accounts
            .find_account_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredential(CredentialFault::WrongPassword))?;

        if !verify(password, &account.password_hash)? {
            return Err(AppError::InvalidCredential(CredentialFault::WrongPassword));
        }
        if account.disabled {
            return Err(AppError::InvalidCredential(CredentialFault::Disabled));
        }

        let id_token = self.mint(&account.uid, &account.email, TokenKind::Identity, Utc::now(), self.identity_token_ttl)?;
        Ok((account.uid, id_token))
    }

    /// Invalidates every session issued to `uid` up to and including now.
    pub async fn revoke_sessions(&self, uid: &str) -> Result<(), AppError> {
        self.accounts.set_tokens_valid_after(uid, Utc::now().timestamp_millis()).await?;
        log::info!("🔒 Sessions revoked for {}", uid);
        Ok(())
    }

    fn mint(
        &self,
        uid: &str,
        email: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let claims = TokenClaims {
            sub: uid.to_string(),
            email: email.to_string(),
            kind,
            iat: issued_at.timestamp(),
            iat_ms: issued_at.timestamp_millis(),
            exp: (issued_at + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    fn decode_token(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &DecodingKey::from_secret(self.secret.as_bytes()), &validation)?.claims;

        if claims.kind != expected {
            return Err(AppError::InvalidCredential(CredentialFault::WrongTokenKind));
        }
        Ok(claims)
    }
}

#[async_trait]
impl CredentialStore for JwtCredentialStore {
    async fn create_session_cookie(&self, id_token: &str, expires_in: Duration) -> Result<String, AppError> {
        let secs = expires_in.num_seconds();
        if !(MIN_SESSION_DURATION_SECS..=MAX_SESSION_DURATION_SECS).contains(&secs) {
            return Err(AppError::InvalidRequest(format!(
                "Session duration must be between {} and {} seconds, got {}",
                MIN_SESSION_DURATION_SECS, MAX_SESSION_DURATION_SECS, secs
            )));
        }

        let claims = self.decode_token(id_token, TokenKind::Identity)?;
        self.mint(&claims.sub, &claims.email, TokenKind::Session, Utc::now(), expires_in)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<AccountInfo>, AppError> {
        let account = self.accounts.find_account_by_email(&normalize_email(email)).await?;
        Ok(account.as_ref().map(AccountInfo::from))
    }

    async fn verify_session_cookie(&self, session_cookie: &str, check_revoked: bool) -> Result<DecodedSession, AppError> {
        let claims = self.decode_token(session_cookie, TokenKind::Session)?;

        if check_revoked {
            let account = self
                .accounts
                .find_account(&claims.sub)
                .await?
                .ok_or(AppError::InvalidCredential(CredentialFault::Revoked))?;

            if account.disabled {
                return Err(AppError::InvalidCredential(CredentialFault::Disabled));
            }
            if account.tokens_valid_after.is_some_and(|after| claims.iat_ms <= after) {
                return Err(AppError::InvalidCredential(CredentialFault::Revoked));
            }
        }

        Ok(DecodedSession {
            uid: claims.sub,
            email: claims.email,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
