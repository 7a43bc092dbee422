//! In-memory stores used by unit and HTTP tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{AccountStore, InterviewStore, UserStore};
use crate::models::{Account, Feedback, Interview, ProfileUpdate, User, UserDocument};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, UserDocument>>,
    accounts: Mutex<HashMap<String, Account>>,
    interviews: Mutex<Vec<Interview>>,
    feedback: Mutex<Vec<Feedback>>,
    /// When set, every call fails with this simulated outage.
    unavailable: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn user_document(&self, uid: &str) -> Option<UserDocument> {
        self.users.lock().unwrap().get(uid).cloned()
    }

    pub fn remove_user(&self, uid: &str) {
        self.users.lock().unwrap().remove(uid);
    }

    pub fn disable_account(&self, uid: &str) {
        if let Some(account) = self.accounts.lock().unwrap().get_mut(uid) {
            account.disabled = true;
        }
    }

    pub fn delete_account(&self, uid: &str) {
        self.accounts.lock().unwrap().remove(uid);
    }

    pub fn add_interview(&self, interview: Interview) {
        self.interviews.lock().unwrap().push(interview);
    }

    pub fn add_feedback(&self, feedback: Feedback) {
        self.feedback.lock().unwrap().push(feedback);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if *self.unavailable.lock().unwrap() {
            return Err(AppError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

fn newest_first(mut interviews: Vec<Interview>) -> Vec<Interview> {
    interviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    interviews
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        self.check_available()?;
        Ok(self.users.lock().unwrap().get(uid).cloned().map(User::from))
    }

    async fn create_user(&self, user: &UserDocument) -> Result<(), AppError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.id) {
            return Err(AppError::Conflict(format!("User {} already exists", user.id)));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_user(&self, uid: &str, update: &ProfileUpdate, updated_at: &str) -> Result<(), AppError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(uid)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;
        if let Some(profile_url) = &update.profile_url {
            record.profile_url = Some(profile_url.clone());
        }
        if let Some(name) = &update.name {
            record.name = name.clone();
        }
        record.updated_at = Some(updated_at.to_string());
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        self.check_available()?;
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_account(&self, uid: &str) -> Result<Option<Account>, AppError> {
        self.check_available()?;
        Ok(self.accounts.lock().unwrap().get(uid).cloned())
    }

    async fn insert_account(&self, account: &Account) -> Result<(), AppError> {
        self.check_available()?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AppError::EmailAlreadyExists(account.email.clone()));
        }
        accounts.insert(account.uid.clone(), account.clone());
        Ok(())
    }

    async fn set_tokens_valid_after(&self, uid: &str, unix_millis: i64) -> Result<(), AppError> {
        self.check_available()?;
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(uid)
            .ok_or_else(|| AppError::NotFound(format!("Account {} not found", uid)))?;
        account.tokens_valid_after = Some(unix_millis);
        Ok(())
    }
}

#[async_trait]
impl InterviewStore for MemoryStore {
    async fn interviews_by_user(&self, user_id: &str) -> Result<Vec<Interview>, AppError> {
        self.check_available()?;
        let interviews = self.interviews.lock().unwrap();
        Ok(newest_first(
            interviews.iter().filter(|i| i.user_id == user_id).cloned().collect(),
        ))
    }

    async fn latest_interviews(&self, user_id: &str, limit: i64) -> Result<Vec<Interview>, AppError> {
        self.check_available()?;
        let interviews = self.interviews.lock().unwrap();
        let mut latest = newest_first(
            interviews
                .iter()
                .filter(|i| i.finalized && i.user_id != user_id)
                .cloned()
                .collect(),
        );
        latest.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(latest)
    }

    async fn interview_by_id(&self, id: &str) -> Result<Option<Interview>, AppError> {
        self.check_available()?;
        Ok(self.interviews.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn feedback_by_interview(&self, interview_id: &str, user_id: &str) -> Result<Option<Feedback>, AppError> {
        self.check_available()?;
        let feedback = self.feedback.lock().unwrap();
        Ok(feedback
            .iter()
            .find(|f| f.interview_id == interview_id && f.user_id == user_id)
            .cloned())
    }
}
