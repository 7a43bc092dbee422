use async_trait::async_trait;
use mongodb::bson::doc;

use super::{MongoDB, ACCOUNTS};
use crate::models::Account;
use crate::utils::AppError;

/// Account directory behind the credential store.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    async fn find_account(&self, uid: &str) -> Result<Option<Account>, AppError>;

    /// Fails with [`AppError::EmailAlreadyExists`] when the email is registered.
    async fn insert_account(&self, account: &Account) -> Result<(), AppError>;

    async fn set_tokens_valid_after(&self, uid: &str, unix_millis: i64) -> Result<(), AppError>;
}

#[async_trait]
impl AccountStore for MongoDB {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let accounts = self.collection::<Account>(ACCOUNTS);
        Ok(accounts.find_one(doc! { "email": email }).await?)
    }

    async fn find_account(&self, uid: &str) -> Result<Option<Account>, AppError> {
        let accounts = self.collection::<Account>(ACCOUNTS);
        Ok(accounts.find_one(doc! { "_id": uid }).await?)
    }

    async fn insert_account(&self, account: &Account) -> Result<(), AppError> {
        let accounts = self.collection::<Account>(ACCOUNTS);
        // uids are fresh v4 UUIDs, so a duplicate key here is the email index.
        accounts.insert_one(account).await.map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::EmailAlreadyExists(account.email.clone()),
            other => other,
        })?;
        Ok(())
    }

    async fn set_tokens_valid_after(&self, uid: &str, unix_millis: i64) -> Result<(), AppError> {
        let accounts = self.collection::<Account>(ACCOUNTS);
        let result = accounts
            .update_one(doc! { "_id": uid }, doc! { "$set": { "tokensValidAfter": unix_millis } })
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Account {} not found", uid)));
        }
        Ok(())
    }
}
