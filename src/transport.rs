//! The byte-level link to the server: POST a JSON body, get the body back.
//!
//! [`Session`](crate::Session) only depends on the [`Transport`] trait, so
//! tests and embedding applications can supply their own. Timeouts and
//! cancellation belong to the transport; the session has no clock of its own.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ZabbixConfig;
use crate::error::{Result, ZabbixError};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request body to `url` and return the raw response body.
    /// Any network or HTTP-level failure is a [`ZabbixError::Transport`].
    async fn send(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Accept invalid TLS certificates. Must be switched on explicitly.
    pub insecure_skip_verify: bool,
    pub timeout: Option<Duration>,
}

impl From<&ZabbixConfig> for TransportOptions {
    fn from(config: &ZabbixConfig) -> Self {
        Self {
            insecure_skip_verify: config.insecure_skip_verify,
            timeout: config.timeout(),
        }
    }
}

/// [`Transport`] over HTTP(S) using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(options: &TransportOptions) -> Result<Self> {
        let mut builder = Client::builder();
        if options.insecure_skip_verify {
            warn!("TLS certificate verification is disabled for the Zabbix API client");
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ZabbixError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json-rpc")
            .body(body)
            .send()
            .await
            .map_err(|e| ZabbixError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("API response status: {}", status);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ZabbixError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ZabbixError::Transport(format!(
                "HTTP {}: {}",
                status,
                String::from_utf8_lossy(&bytes)
            )));
        }

        Ok(bytes.to_vec())
    }
}
