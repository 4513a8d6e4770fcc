//! Login screen flow.

use cpn_client::ApiClient;
use cpn_session::Role;

/// State behind the login form.
#[derive(Debug, Default)]
pub struct LoginView {
    pub user_name: String,
    pub pass_word: String,
    submitting: bool,
    error: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Exchanges the entered credentials for a token, stores it in the
    /// client's session, and returns the route to land on. `None` means
    /// the attempt failed and [`LoginView::error`] says why.
    pub async fn submit(&mut self, client: &ApiClient) -> Option<&'static str> {
        if self.user_name.trim().is_empty() || self.pass_word.is_empty() {
            self.error = Some("username and password are required".to_owned());
            return None;
        }
        self.submitting = true;
        self.error = None;

        let outcome = match client.login(&self.user_name, &self.pass_word).await {
            Ok(token) => match client.session().login(&token) {
                Ok(role) => Some(landing_route(role)),
                Err(error) => {
                    tracing::warn!(%error, "login succeeded but token does not decode");
                    self.error = Some("received an unusable token".to_owned());
                    None
                }
            },
            Err(error) => {
                self.error = Some(format!("login failed: {error}"));
                None
            }
        };
        self.submitting = false;
        outcome
    }
}

/// Where a fresh login lands: the role's dashboard, or the dossier list
/// when the token carries no recognized role.
pub fn landing_route(role: Option<Role>) -> &'static str {
    role.map(|r| r.default_route()).unwrap_or("/dossiers")
}
