//! Authenticated session against one Zabbix server.
//!
//! A [`Session`] owns the auth token and is the single dispatch point for
//! every API method: [`Session::call`] encodes the request, sends it through
//! the [`Transport`], decodes the envelope and turns the `result` into the
//! caller's type. When the server reports that the token is no longer valid
//! the session logs in again once and repeats the call once.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::codec::{decode_response, encode_request, ResponseBody};
use crate::config::{ServerIdentity, ZabbixConfig};
use crate::dto::rpc::LoginRequest;
use crate::error::{Result, ZabbixError};
use crate::token_cache::{FileTokenCache, MemoryTokenCache, TokenCache};
use crate::transport::{HttpTransport, Transport, TransportOptions};

const LOGIN_METHOD: &str = "user.login";
const LOGOUT_METHOD: &str = "user.logout";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

pub struct Session {
    identity: ServerIdentity,
    endpoint: String,
    transport: Arc<dyn Transport>,
    cache: Arc<dyn TokenCache>,
    /// Current token. Held across login so only one task authenticates at a time.
    token: Mutex<Option<String>>,
    state: RwLock<SessionState>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("endpoint", &self.endpoint)
            .field("state", &self.state())
            .finish()
    }
}

impl Session {
    /// Build a session over HTTP with the cache described by `config`.
    /// No request is made until [`Session::connect`] or the first call.
    pub fn new(config: &ZabbixConfig) -> Result<Self> {
        let transport = HttpTransport::new(&TransportOptions::from(config))?;
        let cache: Arc<dyn TokenCache> = match &config.cache_path {
            Some(path) => Arc::new(FileTokenCache::new(path, config.session_ttl())),
            None => Arc::new(MemoryTokenCache::new()),
        };
        Ok(Self::with_parts(config.identity(), Arc::new(transport), cache))
    }

    pub fn with_parts(
        identity: ServerIdentity,
        transport: Arc<dyn Transport>,
        cache: Arc<dyn TokenCache>,
    ) -> Self {
        let endpoint = identity.endpoint();
        Self {
            identity,
            endpoint,
            transport,
            cache,
            token: Mutex::new(None),
            state: RwLock::new(SessionState::Unauthenticated),
            next_id: AtomicU64::new(1),
        }
    }

    /// [`Session::new`] followed by [`Session::connect`].
    pub async fn open(config: &ZabbixConfig) -> Result<Self> {
        let session = Self::new(config)?;
        session.connect().await?;
        Ok(session)
    }

    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn state(&self) -> SessionState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn auth_token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    fn set_state(&self, state: SessionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Authenticate, reusing a cached token when one exists. A cached token
    /// is trusted until the server rejects it.
    pub async fn connect(&self) -> Result<()> {
        let mut token = self.token.lock().await;
        if token.is_some() && self.state() == SessionState::Authenticated {
            return Ok(());
        }
        self.establish(&mut token).await.map(|_| ())
    }

    /// Call `method` with `params` and decode its `result` as `R`.
    ///
    /// Connects first if needed. Transport failures are returned as they are.
    /// A session-expired API error triggers one re-login and one retry; if the
    /// retry is rejected the same way the call fails with
    /// [`ZabbixError::AuthenticationFailed`].
    pub async fn call<P, R>(&self, method: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let token = self.current_token().await?;

        let result = match self.dispatch(method, params, Some(&token)).await {
            Err(ZabbixError::Api(err)) if err.is_session_expired() => {
                warn!("Session expired during {}: {}", method, err);
                let fresh = self.reauthenticate(&token).await?;
                match self.dispatch(method, params, Some(&fresh)).await {
                    Err(ZabbixError::Api(err)) if err.is_session_expired() => {
                        self.invalidate(&fresh).await;
                        return Err(ZabbixError::AuthenticationFailed(format!(
                            "token rejected again after re-login: {err}"
                        )));
                    }
                    other => other?,
                }
            }
            other => other?,
        };

        serde_json::from_value(result).map_err(ZabbixError::Decode)
    }

    /// Send a request that must not carry a token, e.g. `apiinfo.version`.
    pub async fn call_unauthenticated<P, R>(&self, method: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let result = self.dispatch(method, params, None).await?;
        serde_json::from_value(result).map_err(ZabbixError::Decode)
    }

    /// End the session on the server and forget the token locally.
    pub async fn logout(&self) -> Result<()> {
        let mut token = self.token.lock().await;
        let Some(current) = token.take() else {
            self.set_state(SessionState::Unauthenticated);
            return Ok(());
        };
        self.set_state(SessionState::Unauthenticated);

        let result = self
            .dispatch(LOGOUT_METHOD, &Vec::<Value>::new(), Some(&current))
            .await;
        self.forget_cached_token();
        match result {
            Ok(_) => {
                info!("Logged out of {}", self.endpoint);
                Ok(())
            }
            // Nothing left to end on the server side.
            Err(ZabbixError::Api(err)) if err.is_session_expired() => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn current_token(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        match token.as_ref() {
            Some(current) if self.state() == SessionState::Authenticated => Ok(current.clone()),
            _ => self.establish(&mut token).await,
        }
    }

    async fn establish(&self, token: &mut Option<String>) -> Result<String> {
        let key = self.identity.cache_key();
        if let Some(cached) = self.cache.load(&key) {
            info!("Reusing cached session for {}", key);
            *token = Some(cached.clone());
            self.set_state(SessionState::Authenticated);
            return Ok(cached);
        }
        self.login(token).await
    }

    /// Replace `stale` with a fresh token, unless another task already did.
    async fn reauthenticate(&self, stale: &str) -> Result<String> {
        let mut token = self.token.lock().await;
        if let Some(current) = token.as_ref() {
            if current != stale && self.state() == SessionState::Authenticated {
                debug!("Session already renewed by a concurrent call");
                return Ok(current.clone());
            }
        }
        *token = None;
        self.set_state(SessionState::Unauthenticated);
        self.forget_cached_token();
        self.login(&mut token).await
    }

    async fn invalidate(&self, rejected: &str) {
        let mut token = self.token.lock().await;
        if token.as_deref() == Some(rejected) {
            *token = None;
            self.set_state(SessionState::Unauthenticated);
            self.forget_cached_token();
        }
    }

    /// Best effort: a successful login overwrites the entry anyway.
    fn forget_cached_token(&self) {
        if let Err(e) = self.cache.clear(&self.identity.cache_key()) {
            warn!("Failed to clear cached token: {}", e);
        }
    }

    async fn login(&self, token: &mut Option<String>) -> Result<String> {
        self.set_state(SessionState::Authenticating);
        let params = LoginRequest {
            username: self.identity.username.clone(),
            password: self.identity.password.clone(),
        };

        let fresh: String = match self.dispatch(LOGIN_METHOD, &params, None).await {
            Ok(result) => match serde_json::from_value(result) {
                Ok(fresh) => fresh,
                Err(e) => {
                    self.set_state(SessionState::Unauthenticated);
                    return Err(ZabbixError::Decode(e));
                }
            },
            Err(ZabbixError::Api(err)) => {
                self.set_state(SessionState::Unauthenticated);
                return Err(ZabbixError::AuthenticationFailed(err.to_string()));
            }
            Err(err) => {
                self.set_state(SessionState::Unauthenticated);
                return Err(err);
            }
        };

        info!(
            "Logged in to {} as {}",
            self.endpoint, self.identity.username
        );
        *token = Some(fresh.clone());
        self.set_state(SessionState::Authenticated);
        self.cache.store(&self.identity.cache_key(), &fresh)?;
        Ok(fresh)
    }

    /// One request/response round trip, returning the raw `result` member.
    async fn dispatch<P>(&self, method: &str, params: &P, auth: Option<&str>) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = encode_request(method, params, auth, id)?;
        debug!("API request: method={} id={}", method, id);

        let response = self.transport.send(&self.endpoint, body).await?;
        debug!("API response: id={} ({} bytes)", id, response.len());

        let decoded = decode_response(&response)?;
        if let Some(response_id) = decoded.id {
            if response_id != id {
                return Err(ZabbixError::MalformedResponse(format!(
                    "response id {response_id} does not match request id {id}"
                )));
            }
        }

        match decoded.body {
            ResponseBody::Result(result) => Ok(result),
            ResponseBody::Error(err) => Err(ZabbixError::Api(err)),
        }
    }
}
