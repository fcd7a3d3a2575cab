use serde::{Deserialize, Serialize};

use super::common::{is_false, GetParameters, GroupId, SelectQuery, TemplateId};
use super::hostgroup::Hostgroup;
use super::interface::{HostInterface, InterfaceParams};

/// `host.create` params.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostCreateRequest {
    /// Technical host name.
    pub host: String,
    /// Visible name; defaults to `host` on the server side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceParams>,
    pub groups: Vec<GroupId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<TemplateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCreateResponse {
    #[serde(rename = "hostids")]
    pub host_ids: Vec<String>,
}

/// `host.get` params. Id lists are AND-ed exact-match filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostGetRequest {
    #[serde(flatten)]
    pub common: GetParameters,
    #[serde(rename = "groupids", default, skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<String>,
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
    #[serde(rename = "templateids", default, skip_serializing_if = "Vec::is_empty")]
    pub template_ids: Vec<String>,
    #[serde(rename = "monitored_hosts", default, skip_serializing_if = "is_false")]
    pub monitored_hosts: bool,
    #[serde(rename = "with_items", default, skip_serializing_if = "is_false")]
    pub with_items: bool,
    #[serde(
        rename = "selectGroups",
        default,
        skip_serializing_if = "SelectQuery::is_omitted"
    )]
    pub select_groups: SelectQuery,
    #[serde(
        rename = "selectInterfaces",
        default,
        skip_serializing_if = "SelectQuery::is_omitted"
    )]
    pub select_interfaces: SelectQuery,
    #[serde(
        rename = "selectParentTemplates",
        default,
        skip_serializing_if = "SelectQuery::is_omitted"
    )]
    pub select_parent_templates: SelectQuery,
}

/// Host as returned by `host.get`. Related lists are only populated when the
/// matching `select*` parameter was requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Host {
    #[serde(rename = "hostid")]
    pub host_id: String,
    pub host: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub groups: Vec<Hostgroup>,
    #[serde(default)]
    pub interfaces: Vec<HostInterface>,
    #[serde(rename = "parentTemplates", default)]
    pub parent_templates: Vec<LinkedTemplate>,
}

impl Host {
    /// Status `"0"` means monitored, `"1"` unmonitored.
    pub fn is_monitored(&self) -> bool {
        self.status == "0"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedTemplate {
    #[serde(rename = "templateid")]
    pub template_id: String,
    #[serde(default)]
    pub name: String,
}
