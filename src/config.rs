use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_API_PATH: &str = "/zabbix/api_jsonrpc.php";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Address and credentials of one Zabbix server. Fixed for the lifetime of a
/// [`crate::Session`].
#[derive(Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub address: String,
    pub username: String,
    pub password: String,
    pub api_path: String,
}

impl ServerIdentity {
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password: password.into(),
            api_path: DEFAULT_API_PATH.to_string(),
        }
    }

    /// Full URL of the JSON-RPC endpoint. A bare `host[:port]` address is
    /// reached over plain `http://`.
    pub fn endpoint(&self) -> String {
        let base = self.address.trim_end_matches('/');
        let path = self.api_path.trim_start_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            format!("{base}/{path}")
        } else {
            format!("http://{base}/{path}")
        }
    }

    /// Key under which this server's token is cached.
    pub fn cache_key(&self) -> String {
        format!("{}@{}", self.username, self.address)
    }
}

impl fmt::Debug for ServerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerIdentity")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_path", &self.api_path)
            .finish()
    }
}

fn default_api_path() -> String {
    DEFAULT_API_PATH.to_string()
}

fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

#[derive(Clone, Deserialize)]
pub struct ZabbixConfig {
    pub address: String,
    pub user: String,
    pub password: String,
    /// Accept self-signed or otherwise invalid TLS certificates.
    #[serde(default)]
    pub insecure_skip_verify: bool,
    /// Where auth tokens are persisted between runs; in-memory only when unset.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
    #[serde(default = "default_api_path")]
    pub api_path: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ZabbixConfig {
    pub fn identity(&self) -> ServerIdentity {
        ServerIdentity {
            address: self.address.clone(),
            username: self.user.clone(),
            password: self.password.clone(),
            api_path: self.api_path.clone(),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for ZabbixConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZabbixConfig")
            .field("address", &self.address)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("cache_path", &self.cache_path)
            .field("api_path", &self.api_path)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub zabbix: ZabbixConfig,
}

impl Config {
    /// Load `config.toml` from the working directory.
    pub fn new() -> Result<Self> {
        Self::from_file("config.toml")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&config_str)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        info!("Config: {:?}", config);
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        if config.zabbix.address.trim().is_empty() {
            anyhow::bail!("zabbix.address must not be empty");
        }
        Ok(config)
    }
}
