#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use zabbix_rs::{
    MemoryTokenCache, Result, ServerIdentity, Session, TokenCache, Transport, ZabbixError,
};

pub const ADDRESS: &str = "zabbix.test";
pub const CACHE_KEY: &str = "Admin@zabbix.test";

type Handler = Box<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// In-process server: every request body is recorded and answered by `handler`.
pub struct StubTransport {
    handler: Handler,
    requests: Mutex<Vec<Value>>,
    yield_before_reply: bool,
}

impl StubTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            yield_before_reply: false,
        })
    }

    /// Like `new`, but every send yields to the scheduler once so concurrent
    /// calls interleave.
    pub fn yielding<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            yield_before_reply: true,
        })
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request["method"] == method)
            .count()
    }

    pub fn logins(&self) -> usize {
        self.count("user.login")
    }

    pub fn last(&self, method: &str) -> Value {
        self.requests()
            .into_iter()
            .rev()
            .find(|request| request["method"] == method)
            .unwrap_or_else(|| panic!("no {method} request was sent"))
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, _url: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let request: Value = serde_json::from_slice(&body).expect("request body is JSON");
        self.requests.lock().unwrap().push(request.clone());
        if self.yield_before_reply {
            tokio::task::yield_now().await;
        }
        let response = (self.handler)(&request)?;
        Ok(serde_json::to_vec(&response).unwrap())
    }
}

pub fn method(request: &Value) -> &str {
    request["method"].as_str().unwrap_or_default()
}

pub fn auth(request: &Value) -> Option<&str> {
    request.get("auth").and_then(Value::as_str)
}

pub fn reply(request: &Value, result: Value) -> Result<Value> {
    Ok(json!({"jsonrpc": "2.0", "result": result, "id": request["id"]}))
}

pub fn reply_error(request: &Value, code: i64, message: &str, data: &str) -> Result<Value> {
    Ok(json!({
        "jsonrpc": "2.0",
        "error": {"code": code, "message": message, "data": data},
        "id": request["id"]
    }))
}

pub fn expired(request: &Value) -> Result<Value> {
    reply_error(
        request,
        -32602,
        "Invalid params.",
        "Session terminated, re-login, please.",
    )
}

pub fn identity() -> ServerIdentity {
    ServerIdentity::new(ADDRESS, "Admin", "zabbix")
}

pub fn session(transport: &Arc<StubTransport>, cache: &Arc<MemoryTokenCache>) -> Session {
    Session::with_parts(identity(), transport.clone(), cache.clone())
}

/// Session whose cache already holds `token`, so no login happens up front.
pub fn cached_session(
    transport: &Arc<StubTransport>,
    token: &str,
) -> (Session, Arc<MemoryTokenCache>) {
    let cache = Arc::new(MemoryTokenCache::with_token(CACHE_KEY, token));
    (session(transport, &cache), cache)
}

/// Cache that loads and stores normally but cannot remove entries, like a
/// token file whose directory became read-only.
pub struct UnclearableCache {
    inner: MemoryTokenCache,
}

impl UnclearableCache {
    pub fn with_token(token: &str) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryTokenCache::with_token(CACHE_KEY, token),
        })
    }
}

impl TokenCache for UnclearableCache {
    fn load(&self, key: &str) -> Option<String> {
        self.inner.load(key)
    }

    fn store(&self, key: &str, token: &str) -> Result<()> {
        self.inner.store(key, token)
    }

    fn clear(&self, _key: &str) -> Result<()> {
        Err(ZabbixError::Cache("read-only".to_string()))
    }
}
