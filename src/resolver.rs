//! Public IP lookup via an HTTP "what is my IP" service

use std::net::IpAddr;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::dns_provider::IpSource;
use crate::error::SyncError;

/// Resolves the public IP by asking an echo service that answers with the
/// caller's address as a bare text body
pub struct PublicIpResolver {
    url: String,
    client: reqwest::Client,
}

impl PublicIpResolver {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Fetches and parses the public IP
    ///
    /// A body that does not parse as an IP address yields `Ok(None)`.
    pub async fn resolve(&self) -> Result<Option<IpAddr>, SyncError> {
        debug!("Requesting public IP from {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SyncError::transport(&self.url, e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Public IP service answered with status {}", status.as_u16());
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::transport(&self.url, e))?;

        let ip = parse_ip(&body);
        if ip.is_none() {
            debug!("Unparseable public IP response: {:?}", body);
        }
        Ok(ip)
    }
}

#[async_trait]
impl IpSource for PublicIpResolver {
    async fn public_ip(&self) -> Result<Option<IpAddr>, SyncError> {
        self.resolve().await
    }
}

/// Parses trimmed text as an IP literal, `None` if it is not one
pub fn parse_ip(text: &str) -> Option<IpAddr> {
    text.trim().parse().ok()
}

//==============================================================================
// Tests
//==============================================================================
