use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    #[serde(alias = "_id")]
    pub id: String,
    pub role: String,
    pub level: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub techstack: Vec<String>,
    pub created_at: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub interview_type: String,
    #[serde(default)]
    pub finalized: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct CategoryScore {
    pub name: String,
    pub score: f64,
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(alias = "_id")]
    pub id: String,
    pub interview_id: String,
    pub user_id: String,
    pub total_score: f64,
    #[serde(default)]
    pub category_scores: Vec<CategoryScore>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    pub created_at: String,
}

/// Home page data: the caller's interviews and other users' finalized ones.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewOverview {
    pub user_interviews: Vec<Interview>,
    pub latest_interviews: Vec<Interview>,
}
