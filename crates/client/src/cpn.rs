//! Prenatal consultation form endpoints.
//!
//! Creation is a two-step exchange: `POST /cpn` answers with the new
//! record's id as plain text, and the full record (with its planned
//! consultations) is then read back with `GET /cpn/{id}`.

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::models::CpnRecord;
use cpn_forms::CpnSubmissionPayload;
use serde_json::Value;

impl ApiClient {
    /// Loads one CPN record (`GET /cpn/{id}`).
    pub async fn fetch_cpn(&self, id: i64) -> ApiResult<CpnRecord> {
        self.get_json(&format!("/cpn/{id}"), &[]).await
    }

    /// Lists every CPN record (`GET /cpn`); callers filter by patient.
    pub async fn fetch_all_cpns(&self) -> ApiResult<Vec<CpnRecord>> {
        self.get_json("/cpn", &[]).await
    }

    /// Creates a CPN record from an assembled submission payload and
    /// returns the full record. At-most-once semantics are the form's
    /// responsibility (the submit trigger is disabled while in flight);
    /// this call performs no retry of its own.
    pub async fn create_cpn(&self, payload: &CpnSubmissionPayload) -> ApiResult<CpnRecord> {
        let raw = self.post_text("/cpn", payload).await?;
        let id = parse_created_id(&raw)?;
        self.fetch_cpn(id).await
    }
}

/// Extracts the created record id from the creation response.
///
/// The backend answers with the bare id as text (`"123"`); a JSON body
/// carrying `{"id": 123}` or a bare number is accepted as a fallback for
/// future backend versions.
fn parse_created_id(raw: &str) -> ApiResult<i64> {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return Ok(id);
    }
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let candidate = match &value {
            Value::Object(map) => map.get("id").cloned(),
            other => Some(other.clone()),
        };
        if let Some(id) = candidate.as_ref().and_then(Value::as_i64) {
            return Ok(id);
        }
    }
    Err(ApiError::UnexpectedResponse(format!(
        "cannot parse created CPN id from {trimmed:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_id_parses_plain_text() {
        assert_eq!(parse_created_id("123").expect("parses"), 123);
        assert_eq!(parse_created_id("  123\n").expect("parses"), 123);
    }

    #[test]
    fn test_created_id_accepts_json_fallbacks() {
        assert_eq!(parse_created_id(r#"{"id": 42}"#).expect("parses"), 42);
        assert_eq!(parse_created_id("42.0").is_ok(), false);
    }

    #[test]
    fn test_created_id_rejects_noise() {
        assert!(parse_created_id("").is_err());
        assert!(parse_created_id("created").is_err());
        assert!(parse_created_id(r#"{"status":"ok"}"#).is_err());
    }
}
