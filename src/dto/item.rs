use serde::{Deserialize, Serialize};

use super::common::{is_false, GetParameters, SelectQuery};

pub const ITEM_TYPE_ZABBIX_AGENT: i32 = 0;
pub const ITEM_TYPE_TRAPPER: i32 = 2;
pub const ITEM_TYPE_SIMPLE_CHECK: i32 = 3;
pub const ITEM_TYPE_INTERNAL: i32 = 5;
pub const ITEM_TYPE_ZABBIX_AGENT_ACTIVE: i32 = 7;
pub const ITEM_TYPE_HTTP_AGENT: i32 = 19;

pub const VALUE_TYPE_FLOAT: i32 = 0;
pub const VALUE_TYPE_CHARACTER: i32 = 1;
pub const VALUE_TYPE_LOG: i32 = 2;
pub const VALUE_TYPE_UNSIGNED: i32 = 3;
pub const VALUE_TYPE_TEXT: i32 = 4;

/// One entry of the `item.create` params array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreateRequest {
    pub name: String,
    pub key_: String,
    #[serde(rename = "hostid")]
    pub host_id: String,
    #[serde(rename = "type")]
    pub item_type: i32,
    pub value_type: i32,
    /// Required for agent, SNMP, IPMI and JMX items.
    #[serde(
        rename = "interfaceid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub interface_id: Option<String>,
    /// Update interval, e.g. `"30s"` or `"1m"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result of both `item.create` and `item.delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    #[serde(rename = "itemids")]
    pub item_ids: Vec<String>,
}

/// `item.delete` params: the ids wrapped under a fixed `params` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDeleteRequest {
    pub params: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemGetRequest {
    #[serde(flatten)]
    pub common: GetParameters,
    #[serde(rename = "itemids", default, skip_serializing_if = "Vec::is_empty")]
    pub item_ids: Vec<String>,
    #[serde(rename = "groupids", default, skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<String>,
    #[serde(rename = "templateids", default, skip_serializing_if = "Vec::is_empty")]
    pub template_ids: Vec<String>,
    #[serde(rename = "hostids", default, skip_serializing_if = "Vec::is_empty")]
    pub host_ids: Vec<String>,
    #[serde(
        rename = "interfaceids",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub interface_ids: Vec<String>,
    #[serde(rename = "graphids", default, skip_serializing_if = "Vec::is_empty")]
    pub graph_ids: Vec<String>,
    #[serde(rename = "triggerids", default, skip_serializing_if = "Vec::is_empty")]
    pub trigger_ids: Vec<String>,
    #[serde(rename = "webitems", default, skip_serializing_if = "is_false")]
    pub web_items: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inherited: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub templated: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub monitored: bool,
    /// Only items in the host group with this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Only items on the host with this technical name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub with_triggers: bool,
    #[serde(
        rename = "selectHosts",
        default,
        skip_serializing_if = "SelectQuery::is_omitted"
    )]
    pub select_hosts: SelectQuery,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "itemid")]
    pub item_id: String,
    #[serde(rename = "hostid", default)]
    pub host_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key_: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub value_type: String,
    #[serde(default)]
    pub delay: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub units: String,
    #[serde(rename = "interfaceid", default)]
    pub interface_id: String,
    #[serde(rename = "lastvalue", default)]
    pub last_value: String,
    #[serde(rename = "lastclock", default)]
    pub last_clock: String,
    #[serde(default)]
    pub description: String,
}
