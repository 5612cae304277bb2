//! Provider abstraction layer
//!
//! The reconciliation step only talks to these traits, so the HTTP-backed
//! resolver and update client can be swapped for other sources or providers.

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::SyncError;

//==============================================================================
// Traits
//==============================================================================

/// Source of the host's current public IP address
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Looks up the current public IP address
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the source answered but the answer is not a usable
    /// address. Transport failures are errors.
    async fn public_ip(&self) -> Result<Option<IpAddr>, SyncError>;
}

/// DNS provider able to point a dynamic record at a new address
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Points the record `record_id` at `ip`
    ///
    /// # Errors
    ///
    /// - [`SyncError::Transport`] if the provider could not be reached
    /// - [`SyncError::Rejected`] if the provider refused the update
    async fn update_record(&self, record_id: &str, ip: IpAddr) -> Result<(), SyncError>;

    /// Provider name for log output
    fn name(&self) -> &'static str;
}
