use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SignError;
use crate::whitelist::SignGate;

/// Hard bound on one sign request, connect through body.
pub const SIGN_TIMEOUT: Duration = Duration::from_secs(5);

/// Signature material for one packet. All three fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignResult {
    pub sign: String,
    pub extra: String,
    pub token: String,
}

impl SignResult {
    /// `sign` / `extra` / `token` as a key-value mapping for the send path.
    pub fn into_fields(self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("sign", self.sign),
            ("extra", self.extra),
            ("token", self.token),
        ])
    }
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    value: SignResult,
}

#[derive(Clone)]
pub struct SignClient {
    http: reqwest::Client,
    gate: SignGate,
}

impl SignClient {
    pub fn new(gate: SignGate, user_agent: &str) -> Result<Self, SignError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(SignError::Client)?;
        Ok(Self { http, gate })
    }

    pub fn gate(&self) -> &SignGate {
        &self.gate
    }

    /// Ask `endpoint` to sign one packet.
    ///
    /// Commands outside the whitelist return `None` without any network
    /// activity. Every failure is logged and also yields `None`.
    pub async fn fetch_signature(
        &self,
        endpoint: &Url,
        command: &str,
        seq: i32,
        raw_body: &[u8],
    ) -> Option<SignResult> {
        if !self.gate.should_sign(command) {
            return None;
        }

        let started = Instant::now();
        let outcome = self.request(endpoint, command, seq, raw_body).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(result) => {
                debug!(cmd = %command, seq, elapsed_ms, "signed packet");
                Some(result)
            }
            Err(err) => {
                warn!(error = %err, cmd = %command, seq, elapsed_ms, "sign request failed");
                None
            }
        }
    }

    async fn request(
        &self,
        endpoint: &Url,
        command: &str,
        seq: i32,
        raw_body: &[u8],
    ) -> Result<SignResult, SignError> {
        let seq = seq.to_string();
        let src = hex::encode(raw_body);
        // The response is dropped on every path out of this scope, which
        // releases (or, after a timeout, closes) the connection.
        let res = self
            .http
            .get(endpoint.clone())
            .query(&[("cmd", command), ("seq", seq.as_str()), ("src", src.as_str())])
            .timeout(SIGN_TIMEOUT)
            .send()
            .await?;
        if res.status() != StatusCode::OK {
            return Err(SignError::Status(res.status().as_u16()));
        }
        let body = res.bytes().await?;
        let parsed: SignResponse = serde_json::from_slice(&body)?;
        Ok(parsed.value)
    }
}
