use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;

use super::{MongoDB, FEEDBACK, INTERVIEWS};
use crate::models::{Feedback, Interview};
use crate::utils::AppError;

pub const DEFAULT_LATEST_LIMIT: i64 = 20;

/// Read-only access to interview and feedback records.
///
/// Records must carry a string `_id`. A document keyed by an `ObjectId` does
/// not decode into [`Interview`] or [`Feedback`], and a single such document
/// fails the whole list query it is part of.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// The user's interviews, newest first.
    async fn interviews_by_user(&self, user_id: &str) -> Result<Vec<Interview>, AppError>;

    /// Finalized interviews owned by someone other than `user_id`, newest first.
    async fn latest_interviews(&self, user_id: &str, limit: i64) -> Result<Vec<Interview>, AppError>;

    async fn interview_by_id(&self, id: &str) -> Result<Option<Interview>, AppError>;

    async fn feedback_by_interview(&self, interview_id: &str, user_id: &str) -> Result<Option<Feedback>, AppError>;
}

#[async_trait]
impl InterviewStore for MongoDB {
    async fn interviews_by_user(&self, user_id: &str) -> Result<Vec<Interview>, AppError> {
        let interviews = self.collection::<Interview>(INTERVIEWS);
        let cursor = interviews
            .find(doc! { "userId": user_id })
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn latest_interviews(&self, user_id: &str, limit: i64) -> Result<Vec<Interview>, AppError> {
        let interviews = self.collection::<Interview>(INTERVIEWS);
        let cursor = interviews
            .find(doc! { "finalized": true, "userId": { "$ne": user_id } })
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn interview_by_id(&self, id: &str) -> Result<Option<Interview>, AppError> {
        let interviews = self.collection::<Interview>(INTERVIEWS);
        Ok(interviews.find_one(doc! { "_id": id }).await?)
    }

    async fn feedback_by_interview(&self, interview_id: &str, user_id: &str) -> Result<Option<Feedback>, AppError> {
        let feedback = self.collection::<Feedback>(FEEDBACK);
        Ok(feedback
            .find_one(doc! { "interviewId": interview_id, "userId": user_id })
            .await?)
    }
}
