use crate::database::interviews::DEFAULT_LATEST_LIMIT;
use crate::database::InterviewStore;
use crate::models::{Feedback, Interview, InterviewOverview};
use crate::utils::AppError;

/// Interviews owned by `user_id`; empty for anonymous callers.
pub async fn interviews_by_user(store: &dyn InterviewStore, user_id: Option<&str>) -> Result<Vec<Interview>, AppError> {
    match user_id {
        Some(uid) => store.interviews_by_user(uid).await,
        None => Ok(Vec::new()),
    }
}

/// Other users' finalized interviews, newest first.
pub async fn latest_interviews(
    store: &dyn InterviewStore,
    user_id: Option<&str>,
    limit: Option<i64>,
) -> Result<Vec<Interview>, AppError> {
    let limit = limit.unwrap_or(DEFAULT_LATEST_LIMIT);
    if limit <= 0 {
        return Ok(Vec::new());
    }
    store.latest_interviews(user_id.unwrap_or(""), limit).await
}

/// Both lists for the home view; the two queries run concurrently.
pub async fn overview(store: &dyn InterviewStore, user_id: Option<&str>) -> Result<InterviewOverview, AppError> {
    let (user_interviews, latest_interviews) = futures::try_join!(
        interviews_by_user(store, user_id),
        latest_interviews(store, user_id, None),
    )?;

    Ok(InterviewOverview {
        user_interviews,
        latest_interviews,
    })
}

pub async fn interview_by_id(store: &dyn InterviewStore, id: &str) -> Result<Option<Interview>, AppError> {
    store.interview_by_id(id).await
}

pub async fn feedback_by_interview(
    store: &dyn InterviewStore,
    interview_id: &str,
    user_id: &str,
) -> Result<Option<Feedback>, AppError> {
    store.feedback_by_interview(interview_id, user_id).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::models::CategoryScore;

    pub(crate) fn interview(id: &str, user_id: &str, created_at: &str, finalized: bool) -> Interview {
        Interview {
            id: id.to_string(),
            role: "Backend Engineer".to_string(),
            level: "Junior".to_string(),
            questions: vec!["Explain borrowing.".to_string()],
            techstack: vec!["rust".to_string()],
            created_at: created_at.to_string(),
            user_id: user_id.to_string(),
            interview_type: "Technical".to_string(),
            finalized,
        }
    }

    pub(crate) fn feedback(id: &str, interview_id: &str, user_id: &str) -> Feedback {
        Feedback {
            id: id.to_string(),
            interview_id: interview_id.to_string(),
            user_id: user_id.to_string(),
            total_score: 78.0,
            category_scores: vec![CategoryScore {
                name: "Communication Skills".to_string(),
                score: 80.0,
                comment: "Clear answers.".to_string(),
            }],
            strengths: vec!["Structured thinking".to_string()],
            areas_for_improvement: vec!["Depth on async".to_string()],
            final_assessment: "Solid.".to_string(),
            created_at: "2024-05-03T00:00:00.000Z".to_string(),
        }
    }

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_interview(interview("a", "u1", "2024-05-01T00:00:00.000Z", true));
        store.add_interview(interview("b", "u1", "2024-05-02T00:00:00.000Z", false));
        store.add_interview(interview("c", "u2", "2024-05-03T00:00:00.000Z", true));
        store.add_interview(interview("d", "u2", "2024-05-04T00:00:00.000Z", false));
        store.add_interview(interview("e", "u3", "2024-05-05T00:00:00.000Z", true));
        store
    }

    fn ids(interviews: &[Interview]) -> Vec<&str> {
        interviews.iter().map(|i| i.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_user_interviews_newest_first() {
        let store = seeded();
        let mine = interviews_by_user(&store, Some("u1")).await.unwrap();
        assert_eq!(ids(&mine), vec!["b", "a"]);

        assert!(interviews_by_user(&store, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_latest_excludes_own_and_unfinalized() {
        let store = seeded();
        let latest = latest_interviews(&store, Some("u1"), None).await.unwrap();
        assert_eq!(ids(&latest), vec!["e", "c"]);

        let limited = latest_interviews(&store, Some("u1"), Some(1)).await.unwrap();
        assert_eq!(ids(&limited), vec!["e"]);

        assert!(latest_interviews(&store, Some("u1"), Some(0)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_overview() {
        let store = seeded();
        let overview = overview(&store, None).await.unwrap();
        assert!(overview.user_interviews.is_empty());
        assert_eq!(ids(&overview.latest_interviews), vec!["e", "c", "a"]);
    }

    #[tokio::test]
    async fn test_feedback_is_scoped_to_user() {
        let store = seeded();
        store.add_feedback(feedback("f1", "a", "u1"));

        let found = feedback_by_interview(&store, "a", "u1").await.unwrap();
        assert_eq!(found.map(|f| f.id), Some("f1".to_string()));
        assert!(feedback_by_interview(&store, "a", "u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_interview_by_id() {
        let store = seeded();
        assert_eq!(interview_by_id(&store, "c").await.unwrap().map(|i| i.user_id), Some("u2".to_string()));
        assert!(interview_by_id(&store, "zzz").await.unwrap().is_none());
    }
}
