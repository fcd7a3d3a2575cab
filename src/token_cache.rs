//! Persistence of auth tokens between process runs, keyed by server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, ZabbixError};

pub trait TokenCache: Send + Sync {
    /// The cached token for `key`, if one exists and is still considered fresh.
    fn load(&self, key: &str) -> Option<String>;

    fn store(&self, key: &str, token: &str) -> Result<()>;

    /// Forget the token for `key`. Clearing a missing entry is not an error.
    fn clear(&self, key: &str) -> Result<()>;
}

/// Process-local cache; tokens live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryTokenCache {
    tokens: Mutex<HashMap<String, String>>,
}

impl MemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that already holds `token` for `key`.
    pub fn with_token(key: impl Into<String>, token: impl Into<String>) -> Self {
        let cache = Self::new();
        cache
            .tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), token.into());
        cache
    }
}

impl TokenCache for MemoryTokenCache {
    fn load(&self, key: &str) -> Option<String> {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn store(&self, key: &str, token: &str) -> Result<()> {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), token.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedToken {
    token: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    sessions: HashMap<String, CachedToken>,
}

/// JSON file holding one token per server key. Entries older than the TTL
/// are ignored; the server will have expired them anyway.
#[derive(Debug)]
pub struct FileTokenCache {
    path: PathBuf,
    ttl: Duration,
    lock: Mutex<()>,
}

impl FileTokenCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> CacheFile {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return CacheFile::default(),
            Err(e) => {
                let path = self.path.display();
                warn!("Ignoring unreadable token cache {path}: {e}");
                return CacheFile::default();
            }
        };
        serde_json::from_slice(&contents).unwrap_or_else(|e| {
            let path = self.path.display();
            warn!("Ignoring corrupt token cache {path}: {e}");
            CacheFile::default()
        })
    }

    fn write(&self, file: &CacheFile) -> Result<()> {
        let contents = serde_json::to_vec_pretty(file)
            .map_err(|e| ZabbixError::Cache(format!("failed to serialize token cache: {e}")))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        // Staged in a 0600 file and renamed into place.
        let staging = self.staging_path();
        match fs::remove_file(&staging) {
            Ok(()) => debug!("Removed leftover {}", staging.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.io_error(e)),
        }
        let mut out = create_private(&staging).map_err(|e| self.io_error(e))?;
        out.write_all(&contents)
            .and_then(|()| out.sync_all())
            .map_err(|e| self.io_error(e))?;
        drop(out);
        fs::rename(&staging, &self.path)
            .map_err(|e| self.io_error(e))
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, err: io::Error) -> ZabbixError {
        ZabbixError::Cache(format!("{}: {}", self.path.display(), err))
    }

    fn is_fresh(&self, entry: &CachedToken) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(self.ttl) else {
            return true;
        };
        Utc::now().signed_duration_since(entry.created_at) < ttl
    }
}

#[cfg(unix)]
fn create_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

impl TokenCache for FileTokenCache {
    fn load(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = self.read().sessions.remove(key)?;
        if self.is_fresh(&entry) {
            Some(entry.token)
        } else {
            debug!("Cached token for {} is older than {:?}", key, self.ttl);
            None
        }
    }

    fn store(&self, key: &str, token: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.read();
        file.sessions.insert(
            key.to_string(),
            CachedToken {
                token: token.to_string(),
                created_at: Utc::now(),
            },
        );
        self.write(&file)
    }

    fn clear(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.read();
        if file.sessions.remove(key).is_none() {
            return Ok(());
        }
        self.write(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_memory_cache_store_load_clear() {
        let cache = MemoryTokenCache::new();
        assert_eq!(cache.load("Admin@zbx"), None);

        cache.store("Admin@zbx", "abc").unwrap();
        assert_eq!(cache.load("Admin@zbx").as_deref(), Some("abc"));

        cache.clear("Admin@zbx").unwrap();
        assert_eq!(cache.load("Admin@zbx"), None);
        cache.clear("Admin@zbx").unwrap();
    }

    #[test]
    fn test_file_cache_round_trip_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zabbix_session");

        let cache = FileTokenCache::new(&path, HOUR);
        cache.store("Admin@zbx", "abc").unwrap();

        let reopened = FileTokenCache::new(&path, HOUR);
        assert_eq!(reopened.load("Admin@zbx").as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_cache_keys_are_independent() {
        let dir = tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path().join("zabbix_session"), HOUR);

        cache.store("Admin@zbx-a", "token-a").unwrap();
        cache.store("Admin@zbx-b", "token-b").unwrap();
        cache.clear("Admin@zbx-a").unwrap();

        assert_eq!(cache.load("Admin@zbx-a"), None);
        assert_eq!(cache.load("Admin@zbx-b").as_deref(), Some("token-b"));
    }

    #[test]
    fn test_file_cache_ignores_expired_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zabbix_session");
        let created_at = Utc::now() - chrono::Duration::hours(2);
        fs::write(
            &path,
            format!(
                r#"{{"sessions":{{"Admin@zbx":{{"token":"old","created_at":"{}"}}}}}}"#,
                created_at.to_rfc3339()
            ),
        )
        .unwrap();

        assert_eq!(FileTokenCache::new(&path, HOUR).load("Admin@zbx"), None);
        let generous = FileTokenCache::new(&path, Duration::from_secs(3 * 3600));
        assert_eq!(generous.load("Admin@zbx").as_deref(), Some("old"));
    }

    #[test]
    fn test_file_cache_treats_corrupt_file_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zabbix_session");
        fs::write(&path, "not json").unwrap();

        let cache = FileTokenCache::new(&path, HOUR);
        assert_eq!(cache.load("Admin@zbx"), None);

        cache.store("Admin@zbx", "fresh").unwrap();
        assert_eq!(cache.load("Admin@zbx").as_deref(), Some("fresh"));
    }

    #[test]
    fn test_file_cache_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("zabbix").join("session.json");

        let cache = FileTokenCache::new(&path, HOUR);
        cache.store("Admin@zbx", "abc").unwrap();
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_cache_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("zabbix_session");
        let cache = FileTokenCache::new(&path, HOUR);
        cache.store("Admin@zbx", "abc").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_cache_replaces_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("zabbix_session");
        fs::write(&path, "{}").unwrap();
        let world_readable = fs::Permissions::from_mode(0o644);
        fs::set_permissions(&path, world_readable).unwrap();

        let cache = FileTokenCache::new(&path, HOUR);
        cache.store("Admin@zbx", "abc").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!dir.path().join("zabbix_session.tmp").exists());
        assert_eq!(cache.load("Admin@zbx").as_deref(), Some("abc"));
    }
}
