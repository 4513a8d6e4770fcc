//! The session store.
//!
//! One [`Session`] object is the single source of authentication state for
//! the whole client: the HTTP adapter reads the token from it and reports
//! expiry to it, the route guard reads role and permissions from it, and
//! views mutate it only through [`Session::login`] and [`Session::logout`].
//! Token persistence goes through the [`TokenStorage`] seam so a browser
//! host can plug its own storage in place of the in-memory default.

use crate::claims::{decode_claims, Permission, TokenClaims};
use crate::role::{extract_role, Role};
use crate::SessionError;
use std::sync::RwLock;

/// Where the raw bearer token is persisted between sessions.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&mut self, token: &str);
    fn clear(&mut self);
}

/// In-memory token storage; the default when the host provides nothing
/// longer-lived.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage(Option<String>);

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.0.clone()
    }

    fn save(&mut self, token: &str) {
        self.0 = Some(token.to_owned());
    }

    fn clear(&mut self) {
        self.0 = None;
    }
}

/// Authentication state for one running client.
pub struct Session {
    storage: Box<dyn TokenStorage>,
    token: Option<String>,
    claims: Option<TokenClaims>,
    role: Option<Role>,
    /// True until [`Session::restore`] has run; guards render decisions
    /// during startup.
    loading: bool,
}

impl Session {
    /// A fresh session over the given storage. Call [`Session::restore`]
    /// to pick up a persisted token.
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        Self {
            storage,
            token: None,
            claims: None,
            role: None,
            loading: true,
        }
    }

    /// Restores session state from whatever the storage holds. A token
    /// that no longer decodes leaves the session unauthenticated.
    pub fn restore(&mut self) {
        if let Some(token) = self.storage.load() {
            match decode_claims(&token) {
                Ok(claims) => {
                    self.role = extract_role(&claims);
                    self.claims = Some(claims);
                    self.token = Some(token);
                }
                Err(error) => {
                    tracing::warn!(%error, "stored token no longer decodes, discarding");
                    self.storage.clear();
                }
            }
        }
        self.loading = false;
    }

    /// Logs in with a freshly issued token. The token is decoded first and
    /// only persisted when it decodes; the derived role is returned so the
    /// caller can redirect immediately.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] for tokens that do not decode; session
    /// state is left untouched in that case.
    pub fn login(&mut self, token: &str) -> Result<Option<Role>, SessionError> {
        let claims = decode_claims(token)?;
        let role = extract_role(&claims);
        self.storage.save(token);
        self.token = Some(token.to_owned());
        self.claims = Some(claims);
        self.role = role;
        self.loading = false;
        Ok(role)
    }

    /// Logs out, clearing both live state and persisted token.
    pub fn logout(&mut self) {
        self.storage.clear();
        self.token = None;
        self.claims = None;
        self.role = None;
    }

    /// Session expiry as reported by the server (401). Equivalent to
    /// logout; kept separate so call sites read as what they are.
    pub fn expire(&mut self) {
        tracing::info!("session expired, clearing credentials");
        self.logout();
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn claims(&self) -> Option<&TokenClaims> {
        self.claims.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn permissions(&self) -> &[Permission] {
        self.claims
            .as_ref()
            .map(|c| c.permissions.as_slice())
            .unwrap_or(&[])
    }

    /// The actions granted for a model; empty when absent.
    pub fn actions_for(&self, model: &str) -> &[String] {
        self.claims
            .as_ref()
            .map(|c| c.actions_for(model))
            .unwrap_or(&[])
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// A [`Session`] shareable across the HTTP adapter, the guard and the
/// views. Lock scope is kept inside each method; nothing holds the lock
/// across an await point.
pub struct SharedSession {
    inner: RwLock<Session>,
}

impl SharedSession {
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        Self {
            inner: RwLock::new(Session::new(storage)),
        }
    }

    /// In-memory session, restored (empty) and ready; the common test and
    /// demo setup.
    pub fn in_memory() -> Self {
        let session = Self::new(Box::<MemoryTokenStorage>::default());
        session.restore();
        session
    }

    pub fn restore(&self) {
        self.write().restore();
    }

    pub fn login(&self, token: &str) -> Result<Option<Role>, SessionError> {
        self.write().login(token)
    }

    pub fn logout(&self) {
        self.write().logout();
    }

    pub fn expire(&self) {
        self.write().expire();
    }

    pub fn token(&self) -> Option<String> {
        self.read().token().map(str::to_owned)
    }

    pub fn role(&self) -> Option<Role> {
        self.read().role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading()
    }

    pub fn actions_for(&self, model: &str) -> Vec<String> {
        self.read().actions_for(model).to_vec()
    }

    /// Runs a closure against the locked session, for compound reads.
    pub fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.read())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
