use serde::{Deserialize, Serialize};

use super::common::{GetParameters, SelectQuery};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostgroupCreateRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostgroupCreateResponse {
    #[serde(rename = "groupids")]
    pub group_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostgroupGetRequest {
    #[serde(flatten)]
    pub common: GetParameters,
    #[serde(rename = "groupids", default, skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<String>,
    #[serde(rename = "hostids", default, skip_serializing_if = "Vec::is_empty")]
    pub host_ids: Vec<String>,
    #[serde(
        rename = "selectHosts",
        default,
        skip_serializing_if = "SelectQuery::is_omitted"
    )]
    pub select_hosts: SelectQuery,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hostgroup {
    #[serde(rename = "groupid")]
    pub group_id: String,
    #[serde(default)]
    pub name: String,
}
