//! Role derivation from token authorities.

use crate::claims::TokenClaims;

/// The three user roles known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Doctor,
    Receptionist,
}

impl Role {
    /// Derives the role from authority strings.
    ///
    /// Matching is by case-insensitive substring because the backend has
    /// issued both bare (`ADMIN`) and prefixed (`ROLE_ADMIN`) authority
    /// names. Admin outranks doctor outranks receptionist when a token
    /// carries several.
    pub fn from_authorities<I, S>(authorities: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let upper: Vec<String> = authorities
            .into_iter()
            .map(|a| a.as_ref().to_ascii_uppercase())
            .collect();
        let has = |needle: &str| upper.iter().any(|a| a.contains(needle));

        if has("ADMIN") {
            Some(Self::Admin)
        } else if has("DOCTOR") {
            Some(Self::Doctor)
        } else if has("RECEPTION") {
            Some(Self::Receptionist)
        } else {
            None
        }
    }

    /// The landing route a freshly logged-in user of this role is sent to.
    pub fn default_route(&self) -> &'static str {
        match self {
            Self::Admin => "/adminDashboard",
            Self::Doctor => "/doctorDashboard",
            Self::Receptionist => "/dossiers",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Doctor => "DOCTOR",
            Self::Receptionist => "RECEPTIONIST",
        }
    }
}

/// The role carried by a decoded token, if any authority matches.
pub fn extract_role(claims: &TokenClaims) -> Option<Role> {
    Role::from_authorities(claims.authority_strings())
}
