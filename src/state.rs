//! Cached IP file
//!
//! The file holds the last address successfully pushed to the provider as a
//! single line of text. Writes go to a sibling temporary file which is then
//! renamed over the target, so readers never observe a partial write. The
//! temporary file is always created fresh with owner-only permissions.

use std::io::ErrorKind;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::resolver::parse_ip;

/// Loads the cached IP from `path`
///
/// A missing file (first run) and unparseable content both yield `Ok(None)`.
/// Any other read error is returned.
pub async fn load(path: &Path) -> std::io::Result<Option<IpAddr>> {
    debug!("Loading saved IP from {}", path.display());
    match fs::read_to_string(path).await {
        Ok(content) => Ok(parse_ip(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replaces the content of `path` with `ip` followed by a newline
///
/// The file is created owner read/write only.
pub async fn save(path: &Path, ip: IpAddr) -> std::io::Result<()> {
    debug!("Saving IP {} to {}", ip, path.display());
    let tmp = temp_path(path);
    let result = write_and_rename(&tmp, path, ip).await;
    if result.is_err() {
        _ = fs::remove_file(&tmp).await;
    }
    result
}

async fn write_and_rename(tmp: &Path, path: &Path, ip: IpAddr) -> std::io::Result<()> {
    // The temp file is always created fresh, never reused or followed
    match fs::remove_file(tmp).await {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            debug!("Could not remove stale {}: {}", tmp.display(), e);
        }
        _ => {}
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(tmp).await?;
    file.write_all(format!("{ip}\n").as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(tmp, path).await
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

//==============================================================================
// Tests
//==============================================================================
