//! Typed API methods. Each one binds a remote method name to its params and
//! result types and goes through [`Session::call`].
//!
//! Get-style methods never return an empty list: no match is reported as
//! [`ZabbixError::NotFound`]. Create-style methods check that the server
//! returned one id per submitted entity.

use serde_json::Value;

use crate::dto::*;
use crate::error::{Result, ZabbixError};
use crate::session::Session;

fn require_matches<T>(method: &str, found: Vec<T>) -> Result<Vec<T>> {
    if found.is_empty() {
        return Err(ZabbixError::NotFound {
            method: method.to_string(),
        });
    }
    Ok(found)
}

fn require_id_count(method: &str, ids: &[String], submitted: usize) -> Result<()> {
    if ids.len() != submitted {
        return Err(ZabbixError::MalformedResponse(format!(
            "{method} returned {} ids for {submitted} submitted entities",
            ids.len()
        )));
    }
    Ok(())
}

impl Session {
    // ========================================================================
    // API Info
    // ========================================================================

    /// Server API version, e.g. `"6.0.21"`. Sent without an auth token.
    pub async fn api_version(&self) -> Result<String> {
        self.call_unauthenticated("apiinfo.version", &Vec::<Value>::new())
            .await
    }

    // ========================================================================
    // Host Operations
    // ========================================================================

    pub async fn create_host(&self, request: &HostCreateRequest) -> Result<HostCreateResponse> {
        let response: HostCreateResponse = self.call("host.create", request).await?;
        require_id_count("host.create", &response.host_ids, 1)?;
        Ok(response)
    }

    /// Create several hosts in one request; ids come back in input order.
    pub async fn create_hosts(
        &self,
        requests: &[HostCreateRequest],
    ) -> Result<HostCreateResponse> {
        let response: HostCreateResponse = self.call("host.create", requests).await?;
        require_id_count("host.create", &response.host_ids, requests.len())?;
        Ok(response)
    }

    pub async fn get_hosts(&self, request: &HostGetRequest) -> Result<Vec<Host>> {
        let hosts = self.call("host.get", request).await?;
        require_matches("host.get", hosts)
    }

    // ========================================================================
    // Host Group Operations
    // ========================================================================

    pub async fn create_hostgroup(&self, name: &str) -> Result<HostgroupCreateResponse> {
        let request = HostgroupCreateRequest {
            name: name.to_string(),
        };
        let response: HostgroupCreateResponse = self.call("hostgroup.create", &request).await?;
        require_id_count("hostgroup.create", &response.group_ids, 1)?;
        Ok(response)
    }

    pub async fn get_hostgroups(&self, request: &HostgroupGetRequest) -> Result<Vec<Hostgroup>> {
        let groups = self.call("hostgroup.get", request).await?;
        require_matches("hostgroup.get", groups)
    }

    // ========================================================================
    // Item Operations
    // ========================================================================

    pub async fn create_items(&self, requests: &[ItemCreateRequest]) -> Result<ItemResponse> {
        let response: ItemResponse = self.call("item.create", requests).await?;
        require_id_count("item.create", &response.item_ids, requests.len())?;
        Ok(response)
    }

    pub async fn get_items(&self, request: &ItemGetRequest) -> Result<Vec<Item>> {
        let items = self.call("item.get", request).await?;
        require_matches("item.get", items)
    }

    /// Delete items by id. The server applies the deletion atomically.
    pub async fn delete_items(&self, item_ids: Vec<String>) -> Result<ItemResponse> {
        let request = ItemDeleteRequest { params: item_ids };
        self.call("item.delete", &request).await
    }

    // ========================================================================
    // Host Interface Operations
    // ========================================================================

    pub async fn get_host_interfaces(
        &self,
        request: &HostInterfaceGetRequest,
    ) -> Result<Vec<HostInterface>> {
        let interfaces = self.call("hostinterface.get", request).await?;
        require_matches("hostinterface.get", interfaces)
    }

    // ========================================================================
    // Helper Methods for Common Lookups
    // ========================================================================

    /// Look up a single host by its technical name, with groups and interfaces.
    pub async fn get_host_by_name(&self, host: &str) -> Result<Host> {
        let mut common = GetParameters {
            output: SelectQuery::Extend,
            ..Default::default()
        };
        common.filter.insert("host".to_string(), Value::from(host));
        let request = HostGetRequest {
            common,
            select_groups: SelectQuery::Extend,
            select_interfaces: SelectQuery::Extend,
            ..Default::default()
        };

        let mut hosts = self.get_hosts(&request).await?;
        Ok(hosts.swap_remove(0))
    }

    /// All items on the given hosts.
    pub async fn get_items_by_host_ids(&self, host_ids: Vec<String>) -> Result<Vec<Item>> {
        let request = ItemGetRequest {
            common: GetParameters {
                output: SelectQuery::Extend,
                ..Default::default()
            },
            host_ids,
            ..Default::default()
        };

        self.get_items(&request).await
    }

    /// All interfaces of the given hosts.
    pub async fn get_interfaces_by_host_ids(
        &self,
        host_ids: Vec<String>,
    ) -> Result<Vec<HostInterface>> {
        let request = HostInterfaceGetRequest {
            common: GetParameters {
                output: SelectQuery::Extend,
                ..Default::default()
            },
            host_ids,
            ..Default::default()
        };

        self.get_host_interfaces(&request).await
    }
}
