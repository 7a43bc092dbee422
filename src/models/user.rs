use serde::{Deserialize, Serialize};

/// A user as stored in the `users` collection. `_id` is the credential store uid.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "profileURL", default)]
    pub profile_url: Option<String>,
    #[serde(rename = "resumeURL", default)]
    pub resume_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// User record merged with its identifier, as handed to the presentation layer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "profileURL", skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(rename = "resumeURL", skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            email: doc.email,
            profile_url: doc.profile_url,
            resume_url: doc.resume_url,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Partial profile update. Only `Some` fields are written.
#[derive(Debug, Default, Clone, Deserialize, utoipa::ToSchema)]
pub struct ProfileUpdate {
    #[serde(rename = "profileURL", default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.profile_url.is_none() && self.name.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct SignUpParams {
    pub uid: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "profileURL", default)]
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInParams {
    pub email: String,
    pub id_token: String,
}

/// Account creation plus user record in one call.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct RegisterParams {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "profileURL", default)]
    pub profile_url: Option<String>,
}
