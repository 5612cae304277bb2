//! Error types for a reconciliation cycle
//!
//! Configuration and startup failures use `anyhow`; everything that can abort
//! a cycle is a [`SyncError`], so callers and tests can tell the kinds apart.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed source error for transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a reconciliation cycle
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network or TLS failure reaching a remote endpoint
    #[error("request to {url} failed")]
    Transport {
        /// Endpoint without query string (never contains credentials)
        url: String,
        #[source]
        source: BoxError,
    },

    /// Update endpoint answered with something other than `success`
    #[error("failed to update DDNS record: {body}{}", hint_suffix(.hint))]
    Rejected {
        /// Raw response body, verbatim
        body: String,
        /// Explanation for known provider response codes
        hint: Option<&'static str>,
    },

    /// Cached IP file exists but could not be read
    #[error("failed to load saved IP from {}", .path.display())]
    LoadState {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Public IP could not be written while only recording it
    #[error("failed to record IP in {}", .path.display())]
    RecordState {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// DNS record was updated but the new IP could not be persisted
    #[error("DNS record updated but failed to save IP to {}; local cache is stale", .path.display())]
    SaveState {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Wraps a transport failure for `url`
    pub fn transport(url: &str, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }
}

fn hint_suffix(hint: &Option<&'static str>) -> String {
    hint.map(|h| format!(" ({h})")).unwrap_or_default()
}
