//! The reqwest-backed [`ErpGateway`] implementation.
//!
//! One POST per operation against the ERP's JSON-RPC endpoints. Transport
//! and RPC-level faults become [`ErpError::Transport`] with the step name
//! attached; replies missing required fields become [`ErpError::Shape`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::Serialize;
use serde_json::Value;

use attendr_common::attendance::line::{AttendanceLine, LineRecordId};
use attendr_common::config::Config;
use attendr_common::credentials::Credentials;
use attendr_common::errors::ErpError;
use attendr_common::session::SessionHandle;
use attendr_protocols::erp;
use attendr_protocols::jsonrpc::{RpcEnvelope, RpcRequest};

use super::{AuthOutcome, ErpGateway, ProbeDefaults, ProbeId};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    database: String,
}

impl HttpGateway {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            database: config.database.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<P: Serialize>(
        &self,
        step: &'static str,
        path: &str,
        sid: Option<&str>,
        payload: &RpcRequest<P>,
    ) -> Result<reqwest::Response, ErpError> {
        let mut request = self.http.post(self.endpoint(path)).json(payload);
        if let Some(sid) = sid {
            request = request.header(header::COOKIE, format!("sid={sid}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ErpError::transport(step, e.to_string()))?;
        response
            .error_for_status()
            .map_err(|e| ErpError::transport(step, e.to_string()))
    }

    /// POST a dataset call and unwrap the envelope down to its result.
    async fn call<P: Serialize>(
        &self,
        step: &'static str,
        path: &str,
        session: &SessionHandle,
        payload: &RpcRequest<P>,
    ) -> Result<Option<Value>, ErpError> {
        let response = self
            .send(step, path, Some(session.sid.as_str()), payload)
            .await?;
        let envelope: RpcEnvelope<Value> = response
            .json()
            .await
            .map_err(|e| ErpError::transport(step, e.to_string()))?;

        if let Some(fault) = envelope.error {
            return Err(ErpError::transport(step, fault.describe()));
        }
        Ok(envelope.result.filter(|v| !v.is_null()))
    }

    fn require(step: &'static str, result: Option<Value>) -> Result<Value, ErpError> {
        result.ok_or_else(|| ErpError::shape(step, "response carried no result"))
    }
}

/// Accept a bare id or an `[id, label]` pair.
fn id_of(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_array().and_then(|a| a.first()).and_then(Value::as_i64))
}

fn sid_from_headers(headers: &header::HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .find_map(|pair| pair.trim().strip_prefix("sid=").map(str::to_string))
}

#[async_trait]
impl ErpGateway for HttpGateway {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, ErpError> {
        const STEP: &str = "authenticate";

        let payload = erp::authenticate(&self.database, &self.base_url, credentials);
        let response = self.send(STEP, erp::AUTH_ENDPOINT, None, &payload).await?;
        let sid = sid_from_headers(response.headers());

        let envelope: RpcEnvelope<Value> = response
            .json()
            .await
            .map_err(|e| ErpError::transport(STEP, e.to_string()))?;
        if let Some(fault) = envelope.error {
            return Err(ErpError::transport(STEP, fault.describe()));
        }

        let result = envelope.result.unwrap_or(Value::Null);
        let uid = result.get("uid").and_then(Value::as_i64).filter(|u| *u > 0);
        let session_id = result.get("session_id").and_then(Value::as_str);

        let (Some(uid), Some(session_id)) = (uid, session_id) else {
            // A well-formed "no" (uid false/absent) is a rejection,
            // not a fault.
            return Ok(AuthOutcome::Rejected);
        };
        let sid = sid.ok_or_else(|| {
            ErpError::shape(STEP, "login succeeded but no sid cookie was issued")
        })?;

        Ok(AuthOutcome::Granted {
            handle: SessionHandle {
                sid,
                session_id: session_id.to_string(),
                uid,
            },
        })
    }

    async fn read_display_name(&self, session: &SessionHandle) -> Result<String, ErpError> {
        const STEP: &str = "read_user_name";

        let payload = erp::read_user_name(session);
        let result = Self::require(
            STEP,
            self.call(STEP, erp::CALL_KW_ENDPOINT, session, &payload).await?,
        )?;

        // Older servers answer a single-id read with an object, newer
        // ones with a one-row list.
        let name = result
            .get("name")
            .and_then(Value::as_str)
            .or_else(|| {
                result
                    .get(0)
                    .and_then(|row| row.get("name"))
                    .and_then(Value::as_str)
            })
            .ok_or_else(|| ErpError::shape(STEP, "user record carried no name"))?;

        Ok(name.trim().to_string())
    }

    async fn resolve_defaults(&self, session: &SessionHandle) -> Result<ProbeDefaults, ErpError> {
        const STEP: &str = "default_get";

        let payload = erp::default_get(session);
        let result = Self::require(
            STEP,
            self.call(STEP, erp::CALL_KW_ENDPOINT, session, &payload).await?,
        )?;

        let student_id = result
            .get("student_id")
            .and_then(id_of)
            .ok_or_else(|| ErpError::shape(STEP, "defaults carried no student_id"))?;
        let company_id = result
            .get("company_id")
            .and_then(id_of)
            .ok_or_else(|| ErpError::shape(STEP, "defaults carried no company_id"))?;

        Ok(ProbeDefaults {
            student_id,
            company_id,
        })
    }

    async fn create_probe(
        &self,
        session: &SessionHandle,
        defaults: &ProbeDefaults,
    ) -> Result<ProbeId, ErpError> {
        const STEP: &str = "create_probe";

        let payload = erp::create_probe(session, defaults.student_id, defaults.company_id);
        let result = Self::require(
            STEP,
            self.call(STEP, erp::CALL_KW_ENDPOINT, session, &payload).await?,
        )?;

        result
            .as_i64()
            .map(ProbeId)
            .ok_or_else(|| ErpError::shape(STEP, "create returned no record id"))
    }

    async fn trigger_compute(
        &self,
        session: &SessionHandle,
        probe: ProbeId,
    ) -> Result<(), ErpError> {
        const STEP: &str = "button_check_status";

        let payload = erp::trigger_compute(session, probe.0);
        self.call(STEP, erp::CALL_BUTTON_ENDPOINT, session, &payload)
            .await?;
        Ok(())
    }

    async fn read_line_ids(
        &self,
        session: &SessionHandle,
        probe: ProbeId,
    ) -> Result<Vec<LineRecordId>, ErpError> {
        const STEP: &str = "read_line_ids";

        let payload = erp::read_probe_line_ids(session, probe.0);
        let result = Self::require(
            STEP,
            self.call(STEP, erp::CALL_KW_ENDPOINT, session, &payload).await?,
        )?;

        let ids = result
            .get(0)
            .and_then(|row| row.get("atten_status"))
            .and_then(Value::as_array)
            .ok_or_else(|| ErpError::shape(STEP, "probe record carried no atten_status list"))?;

        ids.iter()
            .map(|id| {
                id.as_i64()
                    .map(LineRecordId)
                    .ok_or_else(|| ErpError::shape(STEP, "non-numeric line id in atten_status"))
            })
            .collect()
    }

    async fn read_line_batch(
        &self,
        session: &SessionHandle,
        ids: &[LineRecordId],
    ) -> Result<Option<Vec<AttendanceLine>>, ErpError> {
        const STEP: &str = "read_lines";

        let payload = erp::read_line_batch(session, ids);
        let Some(result) = self
            .call(STEP, erp::CALL_KW_ENDPOINT, session, &payload)
            .await?
        else {
            return Ok(None);
        };

        let lines: Vec<AttendanceLine> = serde_json::from_value(result)
            .map_err(|e| ErpError::shape(STEP, format!("unreadable line rows: {e}")))?;
        Ok(Some(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sid_extraction_from_cookie_headers() {
        let mut headers = header::HeaderMap::new();
        headers.append(
            header::SET_COOKIE,
            "sid=abc123; Path=/; HttpOnly".parse().unwrap(),
        );

        assert_eq!(sid_from_headers(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_sid_extraction_skips_other_cookies() {
        let mut headers = header::HeaderMap::new();
        headers.append(header::SET_COOKIE, "theme=dark; Path=/".parse().unwrap());
        headers.append(
            header::SET_COOKIE,
            "sid=zzz; Secure; HttpOnly".parse().unwrap(),
        );

        assert_eq!(sid_from_headers(&headers).as_deref(), Some("zzz"));
    }

    #[test]
    fn test_sid_extraction_with_no_cookie() {
        assert_eq!(sid_from_headers(&header::HeaderMap::new()), None);
    }

    #[test]
    fn test_id_of_accepts_scalar_and_pair() {
        assert_eq!(id_of(&serde_json::json!(7)), Some(7));
        assert_eq!(id_of(&serde_json::json!([7, "VA-B.Tech"])), Some(7));
        assert_eq!(id_of(&serde_json::json!(false)), None);
    }
}
