use serde::{Deserialize, Serialize};

use super::common::{GetParameters, SelectQuery};

pub const INTERFACE_TYPE_AGENT: i32 = 1;
pub const INTERFACE_TYPE_SNMP: i32 = 2;
pub const INTERFACE_TYPE_IPMI: i32 = 3;
pub const INTERFACE_TYPE_JMX: i32 = 4;

/// Interface definition embedded in `host.create`.
///
/// `dns` is always sent, even when empty, because the server requires the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceParams {
    #[serde(rename = "type")]
    pub interface_type: i32,
    /// 1 for the default interface of its type.
    pub main: i32,
    /// 1 to connect via `ip`, 0 via `dns`.
    #[serde(rename = "useip")]
    pub use_ip: i32,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub dns: String,
    pub port: String,
}

impl InterfaceParams {
    /// Main agent interface reached by IP address.
    pub fn agent(ip: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            interface_type: INTERFACE_TYPE_AGENT,
            main: 1,
            use_ip: 1,
            ip: ip.into(),
            dns: String::new(),
            port: port.into(),
        }
    }
}

/// `hostinterface.get` params.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostInterfaceGetRequest {
    #[serde(flatten)]
    pub common: GetParameters,
    #[serde(rename = "hostids", default, skip_serializing_if = "Vec::is_empty")]
    pub host_ids: Vec<String>,
    #[serde(
        rename = "interfaceids",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub interface_ids: Vec<String>,
    #[serde(rename = "itemids", default, skip_serializing_if = "Vec::is_empty")]
    pub item_ids: Vec<String>,
    #[serde(rename = "triggerids", default, skip_serializing_if = "Vec::is_empty")]
    pub trigger_ids: Vec<String>,
    #[serde(
        rename = "selectItems",
        default,
        skip_serializing_if = "SelectQuery::is_omitted"
    )]
    pub select_items: SelectQuery,
}

/// Interface as returned by the server; numeric fields arrive as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInterface {
    #[serde(rename = "interfaceid")]
    pub interface_id: String,
    #[serde(rename = "hostid", default)]
    pub host_id: String,
    #[serde(rename = "type", default)]
    pub interface_type: String,
    #[serde(default)]
    pub main: String,
    #[serde(rename = "useip", default)]
    pub use_ip: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub dns: String,
    #[serde(default)]
    pub port: String,
}

impl HostInterface {
    /// `ip:port` or `dns:port`, whichever the interface is configured to use.
    pub fn address(&self) -> String {
        let host = if self.use_ip == "1" {
            &self.ip
        } else {
            &self.dns
        };
        format!("{}:{}", host, self.port)
    }
}
