//! User and role administration screen.

use crate::toast::Toast;
use cpn_client::admin::RoleDraft;
use cpn_client::models::{RoleSummary, User, UserDraft};
use cpn_client::ApiClient;

/// State behind the users page.
#[derive(Debug, Default)]
pub struct UserAdminView {
    loading: bool,
    users: Vec<User>,
    roles: Vec<RoleSummary>,
    toast: Option<Toast>,
}

impl UserAdminView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads users and assignable roles concurrently; either failing
    /// degrades to an empty list with an error toast.
    pub async fn load(&mut self, client: &ApiClient) {
        self.loading = true;
        let (users, roles) = tokio::join!(client.fetch_all_users(), client.fetch_all_roles());
        match users {
            Ok(users) => self.users = users,
            Err(error) => {
                tracing::warn!(%error, "failed to load users");
                self.users.clear();
                self.toast = Some(Toast::error(format!("failed to load users: {error}")));
            }
        }
        match roles {
            Ok(roles) => self.roles = roles,
            Err(error) => {
                tracing::warn!(%error, "failed to load roles");
                self.roles.clear();
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn roles(&self) -> &[RoleSummary] {
        &self.roles
    }

    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }

    /// Validates and submits a new-user form. On success the user list is
    /// reloaded. Validation issues come back to the caller for inline
    /// display.
    pub async fn submit_new_user(
        &mut self,
        client: &ApiClient,
        form: &NewUserForm,
    ) -> Result<(), Vec<String>> {
        let draft = form.to_request()?;
        match client.create_user(&draft).await {
            Ok(_) => {
                self.toast = Some(Toast::success("user created"));
                self.load(client).await;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to create user");
                Err(vec![format!("failed to create user: {error}")])
            }
        }
    }

    /// Creates a role and reloads the role list.
    pub async fn submit_new_role(
        &mut self,
        client: &ApiClient,
        role_name: &str,
        description: &str,
    ) -> Result<(), String> {
        if role_name.trim().is_empty() {
            return Err("role name is required".to_owned());
        }
        let draft = RoleDraft {
            role_name: role_name.trim().to_owned(),
            description: description.to_owned(),
        };
        match client.create_role(&draft).await {
            Ok(_) => {
                self.toast = Some(Toast::success("role created"));
                self.load(client).await;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to create role");
                Err(format!("failed to create role: {error}"))
            }
        }
    }
}

/// The create-user dialog's working state.
#[derive(Debug, Default, Clone)]
pub struct NewUserForm {
    pub user_name: String,
    pub pass_word: String,
    pub selected_roles: Vec<RoleSummary>,
}

impl NewUserForm {
    /// Converts the form into the request body.
    ///
    /// # Errors
    ///
    /// Returns the list of problems when the form is incomplete: username
    /// and password are required, at least one role must be selected, and
    /// every selected role must carry a resolvable id (the roles endpoint
    /// has not always returned one).
    pub fn to_request(&self) -> Result<UserDraft, Vec<String>> {
        let mut issues = Vec::new();
        if self.user_name.trim().is_empty() || self.pass_word.is_empty() {
            issues.push("username and password are required".to_owned());
        }
        if self.selected_roles.is_empty() {
            issues.push("select at least one role".to_owned());
        }
        let ids: Vec<_> = self
            .selected_roles
            .iter()
            .filter_map(|r| r.role_id)
            .collect();
        if ids.len() != self.selected_roles.len() {
            issues.push("a selected role has no id; update the roles endpoint".to_owned());
        }
        if !issues.is_empty() {
            return Err(issues);
        }
        Ok(UserDraft {
            user_name: self.user_name.trim().to_owned(),
            pass_word: self.pass_word.clone(),
            user_role_ids: ids,
        })
    }
}
