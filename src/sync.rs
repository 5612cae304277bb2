//! Reconciliation of the DNS record with the host's public IP
//!
//! One cycle: resolve the public IP, load the cached IP, and only when they
//! differ push the update and persist the new address. `SyncMode` covers the
//! one-off variants: always pushing, or only recording the address.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dns_provider::{DnsProvider, IpSource};
use crate::error::SyncError;
use crate::state;

/// Result of a successful cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Public IP matches the cached IP; nothing was sent
    UpToDate(IpAddr),
    /// Record was updated and the cache rewritten
    Updated(IpAddr),
    /// Cache rewritten without contacting the provider
    Recorded(IpAddr),
    /// Public IP service gave no usable address; cycle skipped
    NoPublicAddress,
}

/// How a cycle treats the cached IP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// Update only when the public IP differs from the cache
    #[default]
    Check,
    /// Update even when the cache already holds the public IP
    Force,
    /// Write a changed public IP to the cache but never call the provider
    RecordOnly,
}

/// Runs reconciliation cycles for one DDNS record
pub struct Reconciler {
    ip_source: Arc<dyn IpSource>,
    provider: Arc<dyn DnsProvider>,
    record_id: String,
    state_file: PathBuf,
    mode: SyncMode,
}

impl Reconciler {
    pub fn new(
        ip_source: Arc<dyn IpSource>,
        provider: Arc<dyn DnsProvider>,
        record_id: impl Into<String>,
        state_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            ip_source,
            provider,
            record_id: record_id.into(),
            state_file: state_file.into(),
            mode: SyncMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    /// Runs one cycle
    ///
    /// Any error aborts the cycle. The cache file is only rewritten after the
    /// provider accepted the update.
    pub async fn reconcile(&self) -> Result<SyncOutcome, SyncError> {
        let current = self.ip_source.public_ip().await?;
        debug!("Public IP {:?}", current);

        let saved = state::load(&self.state_file)
            .await
            .map_err(|source| SyncError::LoadState {
                path: self.state_file.clone(),
                source,
            })?;
        debug!("Saved IP {:?}", saved);

        let Some(ip) = current else {
            warn!("Public IP service returned no usable address; skipping update");
            return Ok(SyncOutcome::NoPublicAddress);
        };

        let unchanged = saved.is_some_and(|saved| same_address(saved, ip));
        if unchanged && self.mode != SyncMode::Force {
            info!("IP address {} is up-to-date. No changes made.", ip);
            return Ok(SyncOutcome::UpToDate(ip));
        }

        if self.mode == SyncMode::RecordOnly {
            info!("Skipping DDNS record update as requested; recording {}", ip);
            self.save(ip)
                .await
                .map_err(|source| SyncError::RecordState {
                    path: self.state_file.clone(),
                    source,
                })?;
            return Ok(SyncOutcome::Recorded(ip));
        }

        info!(
            "Public IP changed: {} -> {} ({})",
            saved.map_or_else(|| "none".to_string(), |s| s.to_string()),
            ip,
            self.provider.name()
        );
        self.provider.update_record(&self.record_id, ip).await?;
        info!("Updated record {} successfully", self.record_id);

        self.save(ip)
            .await
            .map_err(|source| SyncError::SaveState {
                path: self.state_file.clone(),
                source,
            })?;
        Ok(SyncOutcome::Updated(ip))
    }

    async fn save(&self, ip: IpAddr) -> std::io::Result<()> {
        state::save(&self.state_file, ip).await?;
        info!("IP {} saved to {}", ip, self.state_file.display());
        Ok(())
    }
}

/// Address equality that treats `::ffff:a.b.c.d` as `a.b.c.d`
fn same_address(a: IpAddr, b: IpAddr) -> bool {
    fn canonical(ip: IpAddr) -> IpAddr {
        match ip {
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(ip, IpAddr::V4),
            IpAddr::V4(_) => ip,
        }
    }
    canonical(a) == canonical(b)
}

//==============================================================================
// Tests
//==============================================================================
