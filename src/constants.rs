//! Common constants used throughout the dme-ddns application

//==============================================================================
// DNS Made Easy Endpoints
//==============================================================================

/// Public IP echo service; answers with the caller's address as bare text
pub const DEFAULT_IP_URL: &str = "http://myip.dnsmadeeasy.com/";

/// Dynamic DNS update endpoint
pub const DEFAULT_UPDATE_URL: &str = "https://cp.dnsmadeeasy.com/servlet/updateip";

/// The one response body that signals a successful update
pub const UPDATE_SUCCESS_BODY: &str = "success";

/// User agent string for outbound requests
pub const USER_AGENT: &str = concat!("dme-ddns/", env!("CARGO_PKG_VERSION"));

//==============================================================================
// Timeout and Interval Constants
//==============================================================================

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimum HTTP request timeout in seconds
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum HTTP request timeout in seconds
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Minimum non-zero check interval in seconds
pub const MIN_INTERVAL_SECS: u64 = 10;

/// Maximum check interval in seconds (one day)
pub const MAX_INTERVAL_SECS: u64 = 86_400;

//==============================================================================
// Logging
//==============================================================================

/// Replacement text for secrets in log output
pub const REDACTED: &str = "***REDACTED***";

//==============================================================================
// Environment Variable Names
//==============================================================================

/// Environment variable name for the DDNS record username
pub const ENV_USERNAME: &str = "DME_USERNAME";

/// Environment variable name for the DDNS record password
pub const ENV_PASSWORD: &str = "DME_PASSWORD";

/// Environment variable name for the DDNS record ID
pub const ENV_RECORD_ID: &str = "DME_RECORD_ID";

/// Environment variable name for the cached IP file
pub const ENV_CURRENT_IP_FILE: &str = "DME_CURRENT_IP_FILE";

/// Environment variable name for the check interval
pub const ENV_INTERVAL: &str = "DME_INTERVAL";

/// Environment variable name to disable TLS certificate verification
pub const ENV_INSECURE: &str = "DME_INSECURE";
