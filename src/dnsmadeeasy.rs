//! DNS Made Easy dynamic DNS update client
//!
//! The update API is a single GET with the credentials, record ID and new
//! address in the query string. The response is a bare text status code.

use std::net::IpAddr;

use async_trait::async_trait;
use tracing::{debug, info};
use urlencoding::encode;
use zeroize::Zeroizing;

use crate::constants::{REDACTED, UPDATE_SUCCESS_BODY};
use crate::dns_provider::DnsProvider;
use crate::error::SyncError;

//==============================================================================
// Client
//==============================================================================

pub struct DnsMadeEasyClient {
    update_url: String,
    username: String,
    password: Zeroizing<String>,
    client: reqwest::Client,
}

impl DnsMadeEasyClient {
    pub fn new(
        client: reqwest::Client,
        update_url: impl Into<String>,
        username: &str,
        password: &str,
    ) -> Self {
        Self {
            update_url: update_url.into(),
            username: username.to_string(),
            password: Zeroizing::new(password.to_string()),
            client,
        }
    }

    /// Points record `record_id` at `ip`
    ///
    /// Only a body of exactly `success` counts as success; anything else is
    /// returned as [`SyncError::Rejected`] with the raw body.
    pub async fn update(&self, record_id: &str, ip: IpAddr) -> Result<(), SyncError> {
        let url = self.request_url(record_id, ip);
        debug!("GET {}", redact_secrets(&url, &self.password));
        info!("Updating DDNS record {} to {}", record_id, ip);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SyncError::transport(&self.update_url, e.without_url()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::transport(&self.update_url, e.without_url()))?;

        debug!("Response status: {}, body: {:?}", status.as_u16(), body);

        if body == UPDATE_SUCCESS_BODY {
            return Ok(());
        }

        Err(SyncError::Rejected {
            hint: describe_response(body.trim()),
            body,
        })
    }

    fn request_url(&self, record_id: &str, ip: IpAddr) -> String {
        let separator = if self.update_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}username={}&password={}&id={}&ip={}",
            self.update_url,
            separator,
            encode(&self.username),
            encode(&self.password),
            encode(record_id),
            ip
        )
    }
}

#[async_trait]
impl DnsProvider for DnsMadeEasyClient {
    async fn update_record(&self, record_id: &str, ip: IpAddr) -> Result<(), SyncError> {
        self.update(record_id, ip).await
    }

    fn name(&self) -> &'static str {
        "DNS Made Easy"
    }
}

//==============================================================================
// Helpers
//==============================================================================

/// Explains the status codes the update endpoint is documented to return
pub fn describe_response(body: &str) -> Option<&'static str> {
    match body {
        "error-auth" => Some("invalid username or password, or invalid IP syntax"),
        "error-auth-suspend" => Some("account suspended"),
        "error-auth-voided" => Some("account revoked"),
        "error-record-invalid" => Some("record ID does not exist"),
        "error-record-auth" => Some("user does not have access to this record"),
        "error-record-ip-same" => Some("IP never changed so nothing was done"),
        "error-system" => Some("general system error recognized by the provider"),
        "error" => Some("general system error unrecognized by the provider"),
        _ => None,
    }
}

/// Replaces the password, raw and percent-encoded, with a placeholder
#[must_use]
pub fn redact_secrets(message: &str, password: &str) -> String {
    if password.is_empty() {
        return message.to_string();
    }
    let encoded = encode(password);
    message
        .replace(&*encoded, REDACTED)
        .replace(password, REDACTED)
}

//==============================================================================
// Tests
//==============================================================================
