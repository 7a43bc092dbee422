pub mod account_service;
pub mod credential_store;
pub mod interview_service;
pub mod session_service;

pub use credential_store::{CredentialStore, JwtCredentialStore};
pub use session_service::{SessionContext, SessionManager};
