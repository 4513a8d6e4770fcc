//! Bearer-token claim decoding.
//!
//! Tokens are opaque JWTs issued by the auth endpoint. The client never
//! verifies signatures; that is the server's job on every request. It
//! only decodes the payload segment to recover identity, the role claim
//! and the permission list.

use crate::SessionError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use serde_json::Value;

/// One grant in the token: the actions allowed on a model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Permission {
    pub model: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// The decoded token payload.
///
/// The authority claim has gone by several names across backend versions
/// (`authorities`, `roles`, `role`) and may be a single string or a list;
/// [`TokenClaims::authority_strings`] normalizes all of that.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    authorities: Option<Value>,
    #[serde(default)]
    roles: Option<Value>,
    #[serde(default)]
    role: Option<Value>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl TokenClaims {
    /// The authority claim as a flat list of strings, first claim name
    /// present wins: `authorities`, then `roles`, then `role`.
    pub fn authority_strings(&self) -> Vec<String> {
        let claim = self
            .authorities
            .as_ref()
            .or(self.roles.as_ref())
            .or(self.role.as_ref());
        match claim {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// The actions granted for a model; empty when the model is not listed.
    pub fn actions_for(&self, model: &str) -> &[String] {
        self.permissions
            .iter()
            .find(|p| p.model == model)
            .map(|p| p.actions.as_slice())
            .unwrap_or(&[])
    }

    /// True when the token carries an expiry in the past.
    pub fn is_expired_at(&self, now_epoch_secs: i64) -> bool {
        matches!(self.exp, Some(exp) if exp <= now_epoch_secs)
    }
}

/// Decodes the claims from a compact JWT without verifying its signature.
///
/// # Errors
///
/// Returns a [`SessionError`] when the token does not have three segments
/// or its payload segment is not base64url-encoded claims JSON.
pub fn decode_claims(token: &str) -> Result<TokenClaims, SessionError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_header, payload, _signature] = segments[..] else {
        return Err(SessionError::MalformedToken);
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    let claims = serde_json::from_slice(&bytes)?;
    Ok(claims)
}
