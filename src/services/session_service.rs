use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};
use chrono::Duration;
use std::sync::Arc;

use crate::database::UserStore;
use crate::models::User;
use crate::services::credential_store::CredentialStore;
use crate::utils::AppError;

pub const SESSION_COOKIE: &str = "session";

/// One week.
pub const SESSION_DURATION_SECS: i64 = 60 * 60 * 24 * 7;

/// Per-request cookie access: the session value the client sent, plus the
/// cookie writes to attach to the response.
#[derive(Debug, Default)]
pub struct SessionContext {
    current: Option<String>,
    pending: Vec<Cookie<'static>>,
}

impl SessionContext {
    pub fn from_request(req: &HttpRequest) -> Self {
        Self::with_session(req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
    }

    pub fn with_session(value: Option<String>) -> Self {
        Self {
            current: value.filter(|v| !v.is_empty()),
            pending: Vec::new(),
        }
    }

    /// Current session value, reflecting writes made during this request.
    pub fn session_token(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn set(&mut self, cookie: Cookie<'static>) {
        self.current = Some(cookie.value().to_string());
        self.pending.retain(|c| c.name() != cookie.name());
        self.pending.push(cookie);
    }

    fn remove(&mut self, path: &'static str) {
        let mut removal = Cookie::build(SESSION_COOKIE, "").path(path).finish();
        removal.make_removal();
        self.current = None;
        self.pending.retain(|c| c.name() != SESSION_COOKIE);
        self.pending.push(removal);
    }

    pub fn pending_cookies(&self) -> &[Cookie<'static>] {
        &self.pending
    }

    /// Adds the pending cookie writes to `builder`.
    pub fn apply(&self, builder: &mut HttpResponseBuilder) {
        for cookie in &self.pending {
            builder.cookie(cookie.clone());
        }
    }
}

/// Issues, clears and resolves session cookies.
pub struct SessionManager {
    credentials: Arc<dyn CredentialStore>,
    users: Arc<dyn UserStore>,
    secure_cookies: bool,
}

impl SessionManager {
    pub fn new(credentials: Arc<dyn CredentialStore>, users: Arc<dyn UserStore>, secure_cookies: bool) -> Self {
        Self {
            credentials,
            users,
            secure_cookies,
        }
    }

    /// Exchanges `id_token` for a week-long session and writes the cookie.
    pub async fn issue_session(&self, ctx: &mut SessionContext, id_token: &str) -> Result<(), AppError> {
        let session = self
            .credentials
            .create_session_cookie(id_token, Duration::seconds(SESSION_DURATION_SECS))
            .await?;

        let cookie = Cookie::build(SESSION_COOKIE, session)
            .max_age(CookieDuration::seconds(SESSION_DURATION_SECS))
            .http_only(true)
            .secure(self.secure_cookies)
            .path("/")
            .same_site(SameSite::Lax)
            .finish();

        ctx.set(cookie);
        Ok(())
    }

    pub fn clear_session(&self, ctx: &mut SessionContext) {
        ctx.remove("/");
    }

    /// The signed-in user, or `None`. Never fails: verification and lookup
    /// errors are logged and treated as anonymous.
    pub async fn current_user(&self, ctx: &SessionContext) -> Option<User> {
        let token = ctx.session_token()?;

        let decoded = match self.credentials.verify_session_cookie(token, true).await {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("⚠️  Session rejected: {}", e);
                return None;
            }
        };

        log::debug!(
            "🔑 Session for {} <{}> issued at {}, expires at {}",
            decoded.uid,
            decoded.email,
            decoded.issued_at,
            decoded.expires_at
        );

        match self.users.find_user(&decoded.uid).await {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                log::warn!("⚠️  Session for {} has no user record", decoded.uid);
                None
            }
            Err(e) => {
                log::error!("❌ Error getting current user {}: {}", decoded.uid, e);
                None
            }
        }
    }

    pub async fn is_authenticated(&self, ctx: &SessionContext) -> bool {
        self.current_user(ctx).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::models::UserDocument;
    use crate::services::credential_store::tests::test_config;
    use crate::services::credential_store::{JwtCredentialStore, TokenClaims, TokenKind};
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    struct Fixture {
        memory: Arc<MemoryStore>,
        credentials: Arc<JwtCredentialStore>,
        sessions: SessionManager,
    }

    fn fixture(secure: bool) -> Fixture {
        let memory = Arc::new(MemoryStore::new());
        let credentials = Arc::new(JwtCredentialStore::new(memory.clone(), &test_config()));
        let sessions = SessionManager::new(credentials.clone(), memory.clone(), secure);
        Fixture {
            memory,
            credentials,
            sessions,
        }
    }

    /// Registers an account with a matching user record; returns (uid, id token).
    async fn signed_up(f: &Fixture, email: &str) -> (String, String) {
        let (account, id_token) = f.credentials.register_account(email, "secret1", None).await.unwrap();
        f.memory
            .create_user(&UserDocument {
                id: account.uid.clone(),
                name: "Ann".to_string(),
                email: email.to_string(),
                profile_url: None,
                resume_url: None,
                created_at: "2024-05-01T10:00:00.000Z".to_string(),
                updated_at: None,
            })
            .await
            .unwrap();
        (account.uid, id_token)
    }

    #[tokio::test]
    async fn test_issue_then_resolve_returns_same_user() {
        let f = fixture(false);
        let (uid, id_token) = signed_up(&f, "ann@x.com").await;

        let mut ctx = SessionContext::default();
        f.sessions.issue_session(&mut ctx, &id_token).await.unwrap();

        let user = f.sessions.current_user(&ctx).await.unwrap();
        assert_eq!(user.id, uid);
        assert!(f.sessions.is_authenticated(&ctx).await);
    }

    #[tokio::test]
    async fn test_issued_cookie_attributes() {
        let f = fixture(false);
        let (_, id_token) = signed_up(&f, "ann@x.com").await;

        let mut ctx = SessionContext::default();
        f.sessions.issue_session(&mut ctx, &id_token).await.unwrap();

        let cookies = ctx.pending_cookies();
        assert_eq!(cookies.len(), 1);
        let cookie = &cookies[0];
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(604_800)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[tokio::test]
    async fn test_secure_flag_follows_environment() {
        let f = fixture(true);
        let (_, id_token) = signed_up(&f, "ann@x.com").await;

        let mut ctx = SessionContext::default();
        f.sessions.issue_session(&mut ctx, &id_token).await.unwrap();
        assert_eq!(ctx.pending_cookies()[0].secure(), Some(true));
    }

    #[tokio::test]
    async fn test_new_session_overwrites_old() {
        let f = fixture(false);
        let (_, id_token) = signed_up(&f, "ann@x.com").await;

        let mut ctx = SessionContext::with_session(Some("stale".to_string()));
        f.sessions.issue_session(&mut ctx, &id_token).await.unwrap();
        f.sessions.issue_session(&mut ctx, &id_token).await.unwrap();

        assert_eq!(ctx.pending_cookies().len(), 1);
        assert_ne!(ctx.session_token(), Some("stale"));
    }

    #[tokio::test]
    async fn test_invalid_identity_token_propagates() {
        let f = fixture(false);
        let mut ctx = SessionContext::default();

        let err = f.sessions.issue_session(&mut ctx, "garbage").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredential(_)));
        assert!(ctx.pending_cookies().is_empty());
        assert!(ctx.session_token().is_none());
    }

    #[tokio::test]
    async fn test_clear_then_resolve_is_anonymous() {
        let f = fixture(false);
        let (_, id_token) = signed_up(&f, "ann@x.com").await;

        let mut ctx = SessionContext::default();
        f.sessions.issue_session(&mut ctx, &id_token).await.unwrap();
        f.sessions.clear_session(&mut ctx);

        assert!(f.sessions.current_user(&ctx).await.is_none());
        let removal = &ctx.pending_cookies()[0];
        assert_eq!(removal.name(), SESSION_COOKIE);
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age(), Some(CookieDuration::ZERO));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let f = fixture(false);
        let mut ctx = SessionContext::default();

        f.sessions.clear_session(&mut ctx);
        f.sessions.clear_session(&mut ctx);

        assert_eq!(ctx.pending_cookies().len(), 1);
        assert!(f.sessions.current_user(&ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_never_fails() {
        let f = fixture(false);
        let (uid, id_token) = signed_up(&f, "ann@x.com").await;

        // absent and empty
        assert!(f.sessions.current_user(&SessionContext::default()).await.is_none());
        assert!(f.sessions.current_user(&SessionContext::with_session(Some(String::new()))).await.is_none());

        // malformed
        let ctx = SessionContext::with_session(Some("not.a.token".to_string()));
        assert!(f.sessions.current_user(&ctx).await.is_none());

        // well-formed, expired 30 seconds ago
        let config = test_config();
        let now = Utc::now();
        let claims = TokenClaims {
            sub: uid.clone(),
            email: "ann@x.com".to_string(),
            kind: TokenKind::Session,
            iat: (now - Duration::minutes(10)).timestamp(),
            iat_ms: (now - Duration::minutes(10)).timestamp_millis(),
            exp: (now - Duration::seconds(30)).timestamp(),
            jti: "expired".to_string(),
            aud: config.jwt_audience.clone(),
            iss: config.jwt_issuer.clone(),
        };
        let expired = encode(&Header::default(), &claims, &EncodingKey::from_secret(config.jwt_secret.as_bytes())).unwrap();
        let ctx = SessionContext::with_session(Some(expired));
        assert!(f.sessions.current_user(&ctx).await.is_none());

        // store unreachable
        let mut ctx = SessionContext::default();
        f.sessions.issue_session(&mut ctx, &id_token).await.unwrap();
        f.memory.set_unavailable(true);
        assert!(f.sessions.current_user(&ctx).await.is_none());
        f.memory.set_unavailable(false);

        // missing user record
        f.memory.remove_user(&uid);
        assert!(f.sessions.current_user(&ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_revoked_right_after_issue_is_anonymous() {
        let f = fixture(false);
        let (uid, id_token) = signed_up(&f, "ann@x.com").await;

        let mut ctx = SessionContext::default();
        f.sessions.issue_session(&mut ctx, &id_token).await.unwrap();
        assert!(f.sessions.is_authenticated(&ctx).await);

        f.credentials.revoke_sessions(&uid).await.unwrap();
        assert!(f.sessions.current_user(&ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_account_is_anonymous() {
        let f = fixture(false);
        let (uid, id_token) = signed_up(&f, "ann@x.com").await;

        let mut ctx = SessionContext::default();
        f.sessions.issue_session(&mut ctx, &id_token).await.unwrap();
        f.memory.disable_account(&uid);

        assert!(!f.sessions.is_authenticated(&ctx).await);
    }
}
