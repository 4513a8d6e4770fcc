//! The HTTP adapter itself.
//!
//! Every request in the client funnels through [`ApiClient::send`]: bearer
//! header from the shared session, JSON bodies, typed errors, and the
//! process-wide 401 reaction. Endpoint wrappers in the sibling modules add
//! nothing but paths and shapes.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use cpn_session::SharedSession;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// HTTP client for the clinic backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Arc<SharedSession>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Arc<SharedSession>) -> Self {
        Self {
            base_url: config.base_url().to_owned(),
            http: reqwest::Client::new(),
            session,
        }
    }

    /// The session this client reads its token from.
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> ApiResult<T> {
        let response = self.send::<()>(Method::GET, path, query, None).await?;
        Self::decode_json(response).await
    }

    /// GET for list endpoints that answer 204 (or an empty body) when
    /// there is nothing to return.
    pub(crate) async fn get_json_opt<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> ApiResult<Option<T>> {
        let response = self.send::<()>(Method::GET, path, query, None).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let text = response.text().await?;
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.send(Method::POST, path, &[], Some(body)).await?;
        Self::decode_json(response).await
    }

    /// POST for the endpoints that answer with a plain-text body.
    pub(crate) async fn post_text<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<String> {
        let response = self.send(Method::POST, path, &[], Some(body)).await?;
        Ok(response.text().await?)
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.send(Method::PUT, path, &[], Some(body)).await?;
        Self::decode_json(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send::<()>(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Builds, sends and status-checks one request.
    ///
    /// A 401 from any endpoint expires the shared session before the error
    /// is returned: losing the session is a process-wide event, not
    /// something an individual view opts into.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, Option<String>)],
        body: Option<&B>,
    ) -> ApiResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .header(reqwest::header::ACCEPT, "application/json");

        let pairs = filter_query(query);
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%url, "401 from backend, expiring session");
            self.session.expire();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Keeps only the query parameters that carry a non-empty value, the way
/// the backend expects optional filters to simply be left off.
pub(crate) fn filter_query(params: &[(&str, Option<String>)]) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| match value {
            Some(v) if !v.is_empty() => Some(((*key).to_owned(), v.clone())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_skips_missing_and_empty_values() {
        let pairs = filter_query(&[
            ("antecedentType", Some("OBSTETRICS".to_owned())),
            ("search", Some(String::new())),
            ("page", None),
        ]);
        assert_eq!(
            pairs,
            vec![("antecedentType".to_owned(), "OBSTETRICS".to_owned())]
        );
    }

    #[test]
    fn test_filter_query_keeps_all_present_values() {
        let pairs = filter_query(&[
            ("a", Some("1".to_owned())),
            ("b", Some("2".to_owned())),
        ]);
        assert_eq!(pairs.len(), 2);
    }
}
