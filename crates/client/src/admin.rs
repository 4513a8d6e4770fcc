//! User and role administration endpoints.
//!
//! The create endpoints answer with a human-readable confirmation line
//! rather than the created entity; callers re-list to refresh.

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{RoleSummary, User, UserDraft};
use serde::Serialize;

/// Request body for creating a role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDraft {
    #[serde(rename = "roleName")]
    pub role_name: String,
    pub description: String,
}

impl ApiClient {
    /// Lists all users (`GET /users/`).
    pub async fn fetch_all_users(&self) -> ApiResult<Vec<User>> {
        self.get_json("/users/", &[]).await
    }

    /// Creates a user (`POST /users/`). Role ids must already be resolved;
    /// see [`crate::models::RoleSummary::role_id`]. The backend answers
    /// with a confirmation message, returned verbatim.
    pub async fn create_user(&self, draft: &UserDraft) -> ApiResult<String> {
        self.post_text("/users/", draft).await
    }

    /// Lists all roles (`GET /roles/`).
    pub async fn fetch_all_roles(&self) -> ApiResult<Vec<RoleSummary>> {
        self.get_json("/roles/", &[]).await
    }

    /// Creates a role (`POST /roles/`).
    pub async fn create_role(&self, draft: &RoleDraft) -> ApiResult<String> {
        self.post_text("/roles/", draft).await
    }
}
