//! # zabbix-rs
//!
//! A typed async client for the Zabbix JSON-RPC management API: hosts, host
//! groups, items and host interfaces, behind one authenticated [`Session`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use zabbix_rs::{Config, Session};
//! use zabbix_rs::dto::{GroupId, HostCreateRequest, InterfaceParams};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Load configuration from config.toml
//! let config = Config::new()?;
//!
//! // Reuses a cached token if there is one, otherwise logs in
//! let session = Session::open(&config.zabbix).await?;
//!
//! let created = session
//!     .create_host(&HostCreateRequest {
//!         host: "srv1".to_string(),
//!         groups: vec![GroupId::new("5")],
//!         interfaces: vec![InterfaceParams::agent("10.0.0.1", "10050")],
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("created host {}", created.host_ids[0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Behaviour
//!
//! - **Cached sessions**: the auth token is persisted per server so later runs
//!   skip `user.login`. A cached token is used until the server rejects it.
//! - **Transparent re-login**: a call rejected for an expired session triggers
//!   one re-login and one retry; a second rejection is
//!   [`ZabbixError::AuthenticationFailed`].
//! - **Empty results are errors**: get-style methods report no matches as
//!   [`ZabbixError::NotFound`] instead of an empty list.
//! - **No hidden retries**: transport failures are returned as they are; use
//!   [`retry::RetryPolicy`] to retry them.
//!
//! ## Configuration
//!
//! ```toml
//! [zabbix]
//! address = "zabbix.example.com"
//! user = "Admin"
//! password = "zabbix"
//! cache_path = "./zabbix_session"
//! # insecure_skip_verify = true   # only for self-signed certificates
//! ```

pub mod api_client;
pub mod codec;
pub mod config;
pub mod dto;
pub mod error;
pub mod retry;
pub mod session;
pub mod token_cache;
pub mod transport;

// Re-export commonly used types at the crate root
pub use config::{Config, ServerIdentity, ZabbixConfig};
pub use dto::*;
pub use error::{ApiError, Result, ZabbixError};
pub use session::{Session, SessionState};
pub use token_cache::{FileTokenCache, MemoryTokenCache, TokenCache};
pub use transport::{HttpTransport, Transport, TransportOptions};
