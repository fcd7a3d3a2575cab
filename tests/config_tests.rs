use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;
use zabbix_rs::config::{Config, DEFAULT_API_PATH};

#[test]
fn test_config_new_with_valid_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    let config_content = r#"
[zabbix]
address = "zabbix.example.com"
user = "Admin"
password = "zabbix"
insecure_skip_verify = true
cache_path = "./zabbix_session"
api_path = "/api_jsonrpc.php"
session_ttl_secs = 600
timeout_secs = 15
"#;

    fs::write(&config_path, config_content).unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let result = Config::new();

    std::env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap();
    assert_eq!(config.zabbix.address, "zabbix.example.com");
    assert_eq!(config.zabbix.user, "Admin");
    assert_eq!(config.zabbix.password, "zabbix");
    assert!(config.zabbix.insecure_skip_verify);
    assert_eq!(
        config.zabbix.cache_path,
        Some(PathBuf::from("./zabbix_session"))
    );
    assert_eq!(config.zabbix.api_path, "/api_jsonrpc.php");
    assert_eq!(config.zabbix.session_ttl(), Duration::from_secs(600));
    assert_eq!(config.zabbix.timeout(), Some(Duration::from_secs(15)));
}

#[test]
fn test_config_defaults() {
    let config = Config::parse(
        r#"
[zabbix]
address = "10.0.0.5"
user = "Admin"
password = "zabbix"
"#,
    )
    .unwrap();

    assert!(!config.zabbix.insecure_skip_verify);
    assert_eq!(config.zabbix.cache_path, None);
    assert_eq!(config.zabbix.api_path, DEFAULT_API_PATH);
    assert_eq!(config.zabbix.session_ttl(), Duration::from_secs(3600));
    assert_eq!(config.zabbix.timeout(), None);
    assert_eq!(
        config.zabbix.identity().endpoint(),
        "http://10.0.0.5/zabbix/api_jsonrpc.php"
    );
}

#[test]
fn test_config_from_missing_file() {
    let dir = tempdir().unwrap();
    let result = Config::from_file(dir.path().join("config.toml"));
    assert!(result.is_err());
}

#[test]
fn test_config_with_invalid_toml() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let invalid = "[zabbix\naddress = \"zbx\"\n";
    fs::write(&config_path, invalid).unwrap();

    assert!(Config::from_file(&config_path).is_err());
}

#[test]
fn test_config_with_missing_fields() {
    let result = Config::parse(
        r#"
[zabbix]
address = "zbx"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_config_with_empty_address() {
    let result = Config::parse(
        r#"
[zabbix]
address = "  "
user = "Admin"
password = "zabbix"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_config_debug_hides_password() {
    let config = Config::parse(
        r#"
[zabbix]
address = "zbx"
user = "Admin"
password = "hunter2"
"#,
    )
    .unwrap();

    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("Admin"));
}

#[test]
fn test_config_clone() {
    let config = Config::parse(
        r#"
[zabbix]
address = "zbx"
user = "Admin"
password = "zabbix"
"#,
    )
    .unwrap();

    let cloned = config.clone();
    assert_eq!(config.zabbix.address, cloned.zabbix.address);
    assert_eq!(config.zabbix.identity(), cloned.zabbix.identity());
}
