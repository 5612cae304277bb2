//! Configuration module for dme-ddns
//!
//! This module handles loading and validating configuration from a TOML file,
//! environment variables and command line flags.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context as _, Result};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::constants::{
    DEFAULT_IP_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_UPDATE_URL, ENV_CURRENT_IP_FILE, ENV_INSECURE,
    ENV_INTERVAL, ENV_PASSWORD, ENV_RECORD_ID, ENV_USERNAME, MAX_INTERVAL_SECS, MAX_TIMEOUT_SECS,
    MIN_INTERVAL_SECS, MIN_TIMEOUT_SECS, REDACTED,
};
use crate::sync::SyncMode;

//==============================================================================
// Config
//==============================================================================

/// Configuration for the dme-ddns client
///
/// Built once at startup and never modified afterwards.
///
/// # Configuration Loading Priority
///
/// 1. Command line flags (highest priority)
/// 2. Environment variables (`DME_*`)
/// 3. Config file given with `--config`
/// 4. Defaults (lowest priority)
#[derive(Clone)]
pub struct Config {
    /// How often to check for IP changes; zero runs a single check
    pub interval: Duration,
    /// Username for updating the DNS record
    pub username: String,
    /// Password for updating the DNS record
    pub password: Zeroizing<String>,
    /// ID number of the DDNS record
    pub record_id: String,
    /// File holding the last IP pushed to DNS Made Easy; created if missing
    pub current_ip_file: PathBuf,
    /// HTTP request timeout
    ///
    /// Default: 30 seconds
    pub timeout: Duration,
    /// Enable verbose logging
    pub verbose: bool,
    /// Skip TLS certificate verification
    pub insecure: bool,
    /// Public IP echo endpoint
    pub ip_url: String,
    /// DDNS update endpoint
    pub update_url: String,
    /// Record the public IP in the cache file without calling the provider
    pub dont_update: bool,
    /// Push the public IP even when it matches the cache file
    pub force: bool,
}

/// Values given on the command line; `None`/`false` means "not given"
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub interval: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub record_id: Option<String>,
    pub current_ip_file: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub verbose: bool,
    pub insecure: bool,
    pub dont_update: bool,
    pub force: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: Duration::ZERO,
            username: String::new(),
            password: Zeroizing::new(String::new()),
            record_id: String::new(),
            current_ip_file: PathBuf::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verbose: false,
            insecure: false,
            ip_url: DEFAULT_IP_URL.to_string(),
            update_url: DEFAULT_UPDATE_URL.to_string(),
            dont_update: false,
            force: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("interval", &self.interval)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("record_id", &self.record_id)
            .field("current_ip_file", &self.current_ip_file)
            .field("timeout", &self.timeout)
            .field("verbose", &self.verbose)
            .field("insecure", &self.insecure)
            .field("ip_url", &self.ip_url)
            .field("update_url", &self.update_url)
            .field("dont_update", &self.dont_update)
            .field("force", &self.force)
            .finish()
    }
}

impl Config {
    /// Loads configuration from file, environment and command line
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to a TOML config file
    /// * `cli` - Values given on the command line
    ///
    /// # Returns
    ///
    /// Returns the validated `Config` or an error if:
    /// - The config file cannot be read or parsed
    /// - An interval or boolean value cannot be parsed
    /// - Required fields are missing or values are out of range
    pub fn load(config_path: Option<PathBuf>, cli: &CliOverrides) -> Result<Self> {
        let mut config = Self::load_from_file(config_path)?;
        config.override_with_env()?;
        config.override_with_cli(cli)?;
        config.validate()?;
        Ok(config)
    }

    /// How each cycle treats the cached IP
    pub fn sync_mode(&self) -> SyncMode {
        if self.dont_update {
            SyncMode::RecordOnly
        } else if self.force {
            SyncMode::Force
        } else {
            SyncMode::Check
        }
    }

    fn load_from_file(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::default();
        let Some(path) = config_path else {
            return Ok(config);
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let file: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        if let Some(v) = file.interval {
            config.interval = v.into_duration()?;
        }
        if let Some(v) = file.username {
            config.username = v;
        }
        if let Some(v) = file.password {
            config.password = Zeroizing::new(v);
        }
        if let Some(v) = file.record_id {
            config.record_id = v;
        }
        if let Some(v) = file.current_ip_file {
            config.current_ip_file = v;
        }
        if let Some(v) = file.timeout {
            config.timeout = Duration::from_secs(v);
        }
        if let Some(v) = file.verbose {
            config.verbose = v;
        }
        if let Some(v) = file.insecure {
            config.insecure = v;
        }
        if let Some(v) = file.ip_url {
            config.ip_url = v;
        }
        if let Some(v) = file.update_url {
            config.update_url = v;
        }
        Ok(config)
    }

    /// Overrides values with non-empty environment variables
    fn override_with_env(&mut self) -> Result<()> {
        if let Some(v) = non_empty_env(ENV_USERNAME) {
            self.username = v;
        }
        if let Some(v) = non_empty_env(ENV_PASSWORD) {
            self.password = Zeroizing::new(v);
        }
        if let Some(v) = non_empty_env(ENV_RECORD_ID) {
            self.record_id = v;
        }
        if let Some(v) = non_empty_env(ENV_CURRENT_IP_FILE) {
            self.current_ip_file = PathBuf::from(v);
        }
        if let Some(v) = non_empty_env(ENV_INTERVAL) {
            self.interval =
                parse_interval(&v).with_context(|| format!("Invalid {ENV_INTERVAL} value"))?;
        }
        if let Some(v) = non_empty_env(ENV_INSECURE) {
            self.insecure =
                parse_bool_env(&v).with_context(|| format!("Invalid {ENV_INSECURE} value"))?;
        }
        Ok(())
    }

    fn override_with_cli(&mut self, cli: &CliOverrides) -> Result<()> {
        // An empty value counts as not given
        if let Some(v) = cli.interval.as_deref().filter(|v| !v.trim().is_empty()) {
            self.interval = parse_interval(v)?;
        }
        if let Some(v) = cli.username.as_ref().filter(|v| !v.is_empty()) {
            self.username = v.clone();
        }
        if let Some(v) = cli.password.as_ref().filter(|v| !v.is_empty()) {
            self.password = Zeroizing::new(v.clone());
        }
        if let Some(v) = cli.record_id.as_ref().filter(|v| !v.is_empty()) {
            self.record_id = v.clone();
        }
        if let Some(v) = cli.current_ip_file.as_ref().filter(|v| !v.as_os_str().is_empty()) {
            self.current_ip_file = v.clone();
        }
        if let Some(v) = cli.timeout {
            self.timeout = Duration::from_secs(v);
        }
        self.verbose |= cli.verbose;
        self.insecure |= cli.insecure;

        // Both are one-off actions: a single check, whatever the interval
        self.dont_update |= cli.dont_update;
        self.force |= cli.force;
        if self.dont_update || self.force {
            self.interval = Duration::ZERO;
        }
        Ok(())
    }

    /// Validates the configuration
    ///
    /// Every problem is reported at once, joined with `; `.
    fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.username.is_empty() {
            errors.push("username is required".to_string());
        }
        if self.password.is_empty() {
            errors.push("password is required".to_string());
        }
        if self.record_id.is_empty() {
            errors.push("record-id is required".to_string());
        }
        if self.current_ip_file.as_os_str().is_empty() {
            errors.push("current-ip-file is required".to_string());
        }

        if !self.interval.is_zero() && self.interval < Duration::from_secs(MIN_INTERVAL_SECS) {
            errors.push(format!(
                "interval ({:?}) must be >= {}s",
                self.interval, MIN_INTERVAL_SECS
            ));
        }
        if self.interval > Duration::from_secs(MAX_INTERVAL_SECS) {
            errors.push(format!(
                "interval ({:?}) must be <= {}s",
                self.interval, MAX_INTERVAL_SECS
            ));
        }
        if self.dont_update && self.force {
            errors.push("dont-update and force cannot be combined".to_string());
        }

        let timeout_secs = self.timeout.as_secs();
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
            errors.push(format!(
                "timeout must be between {} and {} seconds, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, timeout_secs
            ));
        }

        for (name, url) in [("ip-url", &self.ip_url), ("update-url", &self.update_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!("{name} must be an http(s) URL, got: {url}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!(errors.join("; ")))
        }
    }
}

//==============================================================================
// Parsing helpers
//==============================================================================

/// TOML configuration file structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TomlConfig {
    interval: Option<IntervalValue>,
    username: Option<String>,
    password: Option<String>,
    record_id: Option<String>,
    current_ip_file: Option<PathBuf>,
    timeout: Option<u64>,
    verbose: Option<bool>,
    insecure: Option<bool>,
    ip_url: Option<String>,
    update_url: Option<String>,
}

/// `interval = 300` or `interval = "5m"`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntervalValue {
    Seconds(u64),
    Text(String),
}

impl IntervalValue {
    fn into_duration(self) -> Result<Duration> {
        match self {
            Self::Seconds(secs) => Ok(Duration::from_secs(secs)),
            Self::Text(text) => parse_interval(&text),
        }
    }
}

/// Parses an interval such as `30s`, `5m`, `1h30m`, `1.5m`, `500ms` or bare seconds
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`; each number may
/// carry a decimal fraction. `0` (with or without unit) means single-shot mode.
pub fn parse_interval(value: &str) -> Result<Duration> {
    parse_duration_parts(value.trim())
        .with_context(|| format!("invalid interval '{value}'"))
}

fn parse_duration_parts(text: &str) -> Result<Duration> {
    const NANOS_PER_SEC: u128 = 1_000_000_000;

    if text.is_empty() {
        bail!("empty duration");
    }
    if let Ok(secs) = text.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total: u128 = 0;
    let mut rest = text;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_len];
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            bail!("expected a number before '{unit}'");
        }

        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            "" => bail!("missing unit after {number}"),
            other => bail!("unknown unit '{other}' (use ns, us, ms, s, m or h)"),
        };

        let whole: u128 = if whole.is_empty() { 0 } else { whole.parse()? };
        let mut part = whole
            .checked_mul(scale)
            .ok_or_else(|| anyhow!("duration too large"))?;
        if !fraction.is_empty() {
            // Digits past nanosecond precision of an hour cannot matter
            let fraction = &fraction[..fraction.len().min(20)];
            let digits: u128 = fraction.parse()?;
            part = part
                .checked_add(digits * scale / 10u128.pow(fraction.len() as u32))
                .ok_or_else(|| anyhow!("duration too large"))?;
        }

        total = total
            .checked_add(part)
            .ok_or_else(|| anyhow!("duration too large"))?;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| anyhow!("duration too large"))?;
    // Remainder is always below one second
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

/// Parses a boolean value from an environment variable
///
/// - `true`: "1", "true", "yes", "on"
/// - `false`: "0", "false", "no", "off"
fn parse_bool_env(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("expected boolean (true/false/1/0/yes/no/on/off)")),
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

//==============================================================================
// Tests
//==============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let keys = [
                ENV_USERNAME,
                ENV_PASSWORD,
                ENV_RECORD_ID,
                ENV_CURRENT_IP_FILE,
                ENV_INTERVAL,
                ENV_INSECURE,
            ];
            let mut saved = Vec::with_capacity(keys.len());
            for key in keys {
                saved.push((key, std::env::var(key).ok()));
                std::env::remove_var(key);
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.saved.drain(..) {
                if let Some(val) = value {
                    std::env::set_var(key, val);
                } else {
                    std::env::remove_var(key);
                }
            }
        }
    }

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).expect("write config");
        (dir, path)
    }

    const MINIMAL: &str = r#"
username = "alice"
password = "s3cret"
record-id = "1234567"
current-ip-file = "/var/lib/dme-ddns/current-ip"
"#;

    #[test]
    #[serial]
    fn config_load_from_file() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(
            r#"
interval = "5m"
username = "alice"
password = "s3cret"
record-id = "1234567"
current-ip-file = "/var/lib/dme-ddns/current-ip"
timeout = 45
verbose = true
insecure = true
"#,
        );

        let cfg = Config::load(Some(path), &CliOverrides::default()).expect("config load");
        assert_eq!(cfg.interval, Duration::from_secs(300));
        assert_eq!(cfg.username, "alice");
        assert_eq!(cfg.password.as_str(), "s3cret");
        assert_eq!(cfg.record_id, "1234567");
        assert_eq!(
            cfg.current_ip_file,
            PathBuf::from("/var/lib/dme-ddns/current-ip")
        );
        assert_eq!(cfg.timeout, Duration::from_secs(45));
        assert!(cfg.verbose);
        assert!(cfg.insecure);
        assert_eq!(cfg.ip_url, DEFAULT_IP_URL);
        assert_eq!(cfg.update_url, DEFAULT_UPDATE_URL);
    }

    #[test]
    #[serial]
    fn config_defaults_to_single_shot() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(MINIMAL);

        let cfg = Config::load(Some(path), &CliOverrides::default()).expect("config load");
        assert!(cfg.interval.is_zero());
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(!cfg.insecure);
    }

    #[test]
    #[serial]
    fn config_interval_as_integer_seconds() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(&format!("interval = 90\n{MINIMAL}"));

        let cfg = Config::load(Some(path), &CliOverrides::default()).expect("config load");
        assert_eq!(cfg.interval, Duration::from_secs(90));
    }

    #[test]
    #[serial]
    fn config_env_overrides_file() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(MINIMAL);

        std::env::set_var(ENV_USERNAME, "bob");
        std::env::set_var(ENV_PASSWORD, "env-pass");
        std::env::set_var(ENV_RECORD_ID, "7654321");
        std::env::set_var(ENV_INTERVAL, "1h");
        std::env::set_var(ENV_INSECURE, "yes");

        let cfg = Config::load(Some(path), &CliOverrides::default()).expect("config load");
        assert_eq!(cfg.username, "bob");
        assert_eq!(cfg.password.as_str(), "env-pass");
        assert_eq!(cfg.record_id, "7654321");
        assert_eq!(cfg.interval, Duration::from_secs(3600));
        assert!(cfg.insecure);
    }

    #[test]
    #[serial]
    fn config_cli_overrides_env_and_file() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(MINIMAL);
        std::env::set_var(ENV_USERNAME, "bob");

        let cli = CliOverrides {
            interval: Some("30s".to_string()),
            username: Some("carol".to_string()),
            record_id: Some("42".to_string()),
            current_ip_file: Some(PathBuf::from("/tmp/ip")),
            timeout: Some(10),
            verbose: true,
            ..CliOverrides::default()
        };

        let cfg = Config::load(Some(path), &cli).expect("config load");
        assert_eq!(cfg.username, "carol");
        assert_eq!(cfg.password.as_str(), "s3cret");
        assert_eq!(cfg.record_id, "42");
        assert_eq!(cfg.current_ip_file, PathBuf::from("/tmp/ip"));
        assert_eq!(cfg.interval, Duration::from_secs(30));
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert!(cfg.verbose);
    }

    #[test]
    #[serial]
    fn config_cli_only() {
        let _env = EnvGuard::new();
        let cli = CliOverrides {
            username: Some("alice".to_string()),
            password: Some("s3cret".to_string()),
            record_id: Some("1234567".to_string()),
            current_ip_file: Some(PathBuf::from("current-ip")),
            ..CliOverrides::default()
        };

        let cfg = Config::load(None, &cli).expect("config load");
        assert_eq!(cfg.username, "alice");
        assert!(cfg.interval.is_zero());
    }

    #[test]
    #[serial]
    fn config_empty_env_values() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(MINIMAL);

        // Empty env values should not override file values
        std::env::set_var(ENV_USERNAME, "");
        std::env::set_var(ENV_PASSWORD, "");
        std::env::set_var(ENV_RECORD_ID, "");

        let cfg = Config::load(Some(path), &CliOverrides::default()).expect("config load");
        assert_eq!(cfg.username, "alice");
        assert_eq!(cfg.password.as_str(), "s3cret");
        assert_eq!(cfg.record_id, "1234567");
    }

    #[test]
    #[serial]
    fn config_missing_required_fields_reported_together() {
        let _env = EnvGuard::new();
        let err = Config::load(None, &CliOverrides::default()).expect_err("missing required");
        let msg = format!("{err}");
        assert!(msg.contains("username is required"));
        assert!(msg.contains("password is required"));
        assert!(msg.contains("record-id is required"));
        assert!(msg.contains("current-ip-file is required"));
    }

    #[test]
    #[serial]
    fn config_interval_boundary_values() {
        let _env = EnvGuard::new();

        for (interval, ok) in [("0", true), ("9s", false), ("10s", true), ("1s", false)] {
            let (_dir, path) = write_config(&format!("interval = \"{interval}\"\n{MINIMAL}"));
            let result = Config::load(Some(path), &CliOverrides::default());
            assert_eq!(result.is_ok(), ok, "interval {interval}");
            if let Err(err) = result {
                assert!(format!("{err}").contains("must be >= 10s"));
            }
        }

        for (interval, ok) in [("24h", true), ("86401", false), ("18446744073709551615", false)] {
            let cli = CliOverrides {
                interval: Some(interval.to_string()),
                ..CliOverrides::default()
            };
            let (_dir, path) = write_config(MINIMAL);
            let result = Config::load(Some(path), &cli);
            assert_eq!(result.is_ok(), ok, "interval {interval}");
            if let Err(err) = result {
                assert!(format!("{err}").contains("must be <= 86400s"));
            }
        }
    }

    #[test]
    #[serial]
    fn config_empty_cli_interval_is_not_given() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(&format!("interval = \"5m\"\n{MINIMAL}"));
        let cli = CliOverrides {
            interval: Some(String::new()),
            ..CliOverrides::default()
        };

        let cfg = Config::load(Some(path), &cli).expect("config load");
        assert_eq!(cfg.interval, Duration::from_secs(300));
    }

    #[test]
    #[serial]
    fn config_one_off_flags_force_single_shot() {
        let _env = EnvGuard::new();

        let (_dir, path) = write_config(&format!("interval = \"5m\"\n{MINIMAL}"));
        let cfg = Config::load(Some(path), &CliOverrides::default()).expect("config load");
        assert_eq!(cfg.sync_mode(), SyncMode::Check);

        for (dont_update, force, mode) in [
            (true, false, SyncMode::RecordOnly),
            (false, true, SyncMode::Force),
        ] {
            let (_dir, path) = write_config(&format!("interval = \"5m\"\n{MINIMAL}"));
            let cli = CliOverrides {
                dont_update,
                force,
                ..CliOverrides::default()
            };
            let cfg = Config::load(Some(path), &cli).expect("config load");
            assert_eq!(cfg.sync_mode(), mode);
            assert!(cfg.interval.is_zero());
        }
    }

    #[test]
    #[serial]
    fn config_rejects_dont_update_with_force() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(MINIMAL);
        let cli = CliOverrides {
            dont_update: true,
            force: true,
            ..CliOverrides::default()
        };

        let err = Config::load(Some(path), &cli).expect_err("conflicting flags");
        assert!(format!("{err}").contains("cannot be combined"));
    }

    #[test]
    #[serial]
    fn config_timeout_boundary_values() {
        let _env = EnvGuard::new();

        for (timeout, ok) in [(0, false), (1, true), (300, true), (301, false)] {
            let (_dir, path) = write_config(&format!("timeout = {timeout}\n{MINIMAL}"));
            let result = Config::load(Some(path), &CliOverrides::default());
            assert_eq!(result.is_ok(), ok, "timeout {timeout}");
            if let Err(err) = result {
                assert!(format!("{err}").contains("timeout"));
            }
        }
    }

    #[test]
    #[serial]
    fn config_missing_file_is_error() {
        let _env = EnvGuard::new();
        let dir = TempDir::new().expect("temp dir");
        let err = Config::load(Some(dir.path().join("nope.toml")), &CliOverrides::default())
            .expect_err("missing file");
        assert!(format!("{err}").contains("Failed to read config"));
    }

    #[test]
    #[serial]
    fn config_unknown_key_is_error() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(&format!("record_id = \"1\"\n{MINIMAL}"));
        assert!(Config::load(Some(path), &CliOverrides::default()).is_err());
    }

    #[test]
    #[serial]
    fn config_invalid_insecure_env() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(MINIMAL);
        std::env::set_var(ENV_INSECURE, "maybe");

        let err = Config::load(Some(path), &CliOverrides::default()).expect_err("bad bool");
        assert!(format!("{err:#}").contains(ENV_INSECURE));
    }

    #[test]
    #[serial]
    fn config_rejects_non_http_endpoint() {
        let _env = EnvGuard::new();
        let (_dir, path) = write_config(&format!("update-url = \"ftp://example.com\"\n{MINIMAL}"));
        let err = Config::load(Some(path), &CliOverrides::default()).expect_err("bad url");
        assert!(format!("{err}").contains("update-url"));
    }

    #[test]
    fn config_debug_redacts_password() {
        let cfg = Config {
            password: Zeroizing::new("hunter2".to_string()),
            ..Config::default()
        };
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains(REDACTED));
    }

    #[test]
    fn parse_interval_units() {
        assert_eq!(parse_interval("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_interval("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_interval("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_interval("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_interval("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_interval("1500ms").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_interval(" 0s ").unwrap(), Duration::ZERO);
    }

    #[test]
    fn parse_interval_fractions_and_small_units() {
        assert_eq!(parse_interval("1.5m").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_interval("2.25h").unwrap(), Duration::from_secs(8100));
        assert_eq!(parse_interval(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_interval("500us").unwrap(), Duration::from_micros(500));
        assert_eq!(parse_interval("500µs").unwrap(), Duration::from_micros(500));
        assert_eq!(parse_interval("250ns").unwrap(), Duration::from_nanos(250));
        assert_eq!(parse_interval("1m0.5s").unwrap(), Duration::from_millis(60_500));
    }

    #[test]
    fn parse_interval_invalid() {
        for value in ["", "m", "5x", "1h30", "-5s", ".s", "1..5m", "99999999999999999999999h"] {
            assert!(parse_interval(value).is_err(), "{value:?}");
        }
        let err = parse_interval("5x").unwrap_err();
        assert!(format!("{err}").contains("invalid interval '5x'"));
    }

    #[test]
    fn parse_bool_env_variants() {
        for value in ["1", "true", "yes", "on", " TRUE "] {
            assert!(parse_bool_env(value).unwrap());
        }
        for value in ["0", "false", "no", "off"] {
            assert!(!parse_bool_env(value).unwrap());
        }
        assert!(parse_bool_env("maybe").is_err());
    }
}
