use async_trait::async_trait;
use mongodb::bson::{doc, Document};

use super::{MongoDB, USERS};
use crate::models::{ProfileUpdate, User, UserDocument};
use crate::utils::AppError;

/// Access to user records keyed by credential store uid.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, uid: &str) -> Result<Option<User>, AppError>;

    /// Inserts a new record. Fails with [`AppError::Conflict`] if `_id` is already taken.
    async fn create_user(&self, user: &UserDocument) -> Result<(), AppError>;

    /// Applies the present fields of `update` plus `updatedAt`. Fails with
    /// [`AppError::NotFound`] when no record exists.
    async fn update_user(&self, uid: &str, update: &ProfileUpdate, updated_at: &str) -> Result<(), AppError>;
}

/// `$set` document for a profile update: only the supplied fields, always `updatedAt`.
pub fn profile_update_document(update: &ProfileUpdate, updated_at: &str) -> Document {
    let mut set = Document::new();
    if let Some(profile_url) = &update.profile_url {
        set.insert("profileURL", profile_url.as_str());
    }
    if let Some(name) = &update.name {
        set.insert("name", name.as_str());
    }
    set.insert("updatedAt", updated_at);
    set
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        let users = self.collection::<UserDocument>(USERS);
        let record = users.find_one(doc! { "_id": uid }).await?;
        Ok(record.map(User::from))
    }

    async fn create_user(&self, user: &UserDocument) -> Result<(), AppError> {
        let users = self.collection::<UserDocument>(USERS);
        users.insert_one(user).await.map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict(format!("User {} already exists", user.id)),
            other => other,
        })?;
        Ok(())
    }

    async fn update_user(&self, uid: &str, update: &ProfileUpdate, updated_at: &str) -> Result<(), AppError> {
        let users = self.collection::<UserDocument>(USERS);
        let set = profile_update_document(update, updated_at);

        let result = users.update_one(doc! { "_id": uid }, doc! { "$set": set }).await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("User {} not found", uid)));
        }
        Ok(())
    }
}
