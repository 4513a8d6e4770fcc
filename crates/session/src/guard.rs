//! Route gating decisions.
//!
//! The guard itself does not navigate; it answers what the host router
//! should do with an attempted navigation, in the same order the original
//! screens resolved it: still loading, then authentication, then
//! permissions.

use crate::role::Role;
use crate::store::Session;

/// A permission the target route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredPermission<'a> {
    pub model: &'a str,
    pub action: &'a str,
}

impl<'a> RequiredPermission<'a> {
    pub fn new(model: &'a str, action: &'a str) -> Self {
        Self { model, action }
    }
}

/// What the router should do with the attempted navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session state is still being restored; show a placeholder.
    Loading,
    /// Not authenticated: go to the login screen.
    RedirectToLogin,
    /// Authenticated but not allowed here.
    RedirectToUnauthorized,
    Allow,
}

/// Gates a navigation by authentication, optional role membership and
/// required permissions (all of which must be granted).
pub fn authorize(
    session: &Session,
    required_role: Option<Role>,
    required: &[RequiredPermission<'_>],
) -> RouteDecision {
    if session.is_loading() {
        return RouteDecision::Loading;
    }
    if !session.is_authenticated() {
        return RouteDecision::RedirectToLogin;
    }
    if let Some(role) = required_role {
        if session.role() != Some(role) {
            return RouteDecision::RedirectToUnauthorized;
        }
    }
    let granted = |p: &RequiredPermission<'_>| {
        session.actions_for(p.model).iter().any(|a| a == p.action)
    };
    if !required.iter().all(granted) {
        return RouteDecision::RedirectToUnauthorized;
    }
    RouteDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTokenStorage;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use serde_json::json;

    fn session_with(payload: serde_json::Value) -> Session {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        let mut session = Session::new(Box::<MemoryTokenStorage>::default());
        session.restore();
        session
            .login(&format!("{header}.{body}.sig"))
            .expect("valid token");
        session
    }

    #[test]
    fn test_loading_session_waits() {
        let session = Session::new(Box::<MemoryTokenStorage>::default());
        assert_eq!(authorize(&session, None, &[]), RouteDecision::Loading);
    }

    #[test]
    fn test_unauthenticated_goes_to_login() {
        let mut session = Session::new(Box::<MemoryTokenStorage>::default());
        session.restore();
        assert_eq!(authorize(&session, None, &[]), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn test_missing_permission_is_unauthorized() {
        let session = session_with(json!({
            "sub": "a",
            "authorities": ["ROLE_DOCTOR"],
            "permissions": [{ "model": "dossier", "actions": ["read"] }]
        }));
        let read = [RequiredPermission::new("dossier", "read")];
        let create = [RequiredPermission::new("dossier", "create")];
        assert_eq!(authorize(&session, None, &read), RouteDecision::Allow);
        assert_eq!(
            authorize(&session, None, &create),
            RouteDecision::RedirectToUnauthorized
        );
    }

    #[test]
    fn test_role_gate() {
        let session = session_with(json!({ "sub": "a", "authorities": ["ROLE_DOCTOR"] }));
        assert_eq!(
            authorize(&session, Some(Role::Doctor), &[]),
            RouteDecision::Allow
        );
        assert_eq!(
            authorize(&session, Some(Role::Admin), &[]),
            RouteDecision::RedirectToUnauthorized
        );
    }
}
