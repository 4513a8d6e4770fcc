//! Client configuration.
//!
//! Resolved once at startup and passed into [`crate::ApiClient`]; nothing
//! reads environment variables during request handling.

/// Default API base, matching the backend's local development setup.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080/api/v1";

/// Where and how the client talks to the backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// A config pointing at the given base URL; trailing slashes are
    /// trimmed so path joining stays uniform.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://clinic.example/api/v1/");
        assert_eq!(config.base_url(), "https://clinic.example/api/v1");
    }

    #[test]
    fn test_default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().base_url(), DEFAULT_API_BASE);
    }
}
