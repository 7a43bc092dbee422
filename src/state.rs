use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{AccountStore, InterviewStore, UserStore};
use crate::services::{JwtCredentialStore, SessionManager};

/// Shared per-worker state handed to handlers via `web::Data`.
pub struct AppState {
    pub sessions: SessionManager,
    pub credentials: Arc<JwtCredentialStore>,
    pub users: Arc<dyn UserStore>,
    pub interviews: Arc<dyn InterviewStore>,
}

impl AppState {
    /// Wires every service over one backing store.
    pub fn new<S>(store: Arc<S>, config: &AppConfig) -> Self
    where
        S: UserStore + AccountStore + InterviewStore + 'static,
    {
        let credentials = Arc::new(JwtCredentialStore::new(store.clone(), config));
        let sessions = SessionManager::new(credentials.clone(), store.clone(), config.is_production());

        Self {
            sessions,
            credentials,
            users: store.clone(),
            interviews: store,
        }
    }
}
