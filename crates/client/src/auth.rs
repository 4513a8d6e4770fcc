//! Authentication endpoint.

use crate::error::ApiResult;
use crate::http::ApiClient;
use serde::Serialize;

/// Login request body; the backend expects exactly these key spellings.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "passWord")]
    pub pass_word: String,
}

impl ApiClient {
    /// Exchanges credentials for a bearer token (`POST /auth/`).
    ///
    /// The token comes back as the raw response body; storing it in the
    /// session is the caller's move, not this adapter's.
    pub async fn login(&self, user_name: &str, pass_word: &str) -> ApiResult<String> {
        let body = Credentials {
            user_name: user_name.to_owned(),
            pass_word: pass_word.to_owned(),
        };
        let token = self.post_text("/auth/", &body).await?;
        Ok(token.trim().to_owned())
    }
}
