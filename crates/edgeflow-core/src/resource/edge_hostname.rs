//! Edge hostnames visible to the account

use super::MembershipResource;
use serde::Deserialize;

pub const EDGE_HOSTNAMES_PATH: &str = "/config-dns/v2/data/edgehostnames";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeHostnameList {
    #[serde(default)]
    pub edge_hostnames: Vec<EdgeHostname>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeHostname {
    pub edge_hostname: String,
    #[serde(default)]
    pub supports_zone_apex_mapping: bool,
}

/// Waits for `target` to appear in the account's edge hostname list
#[derive(Debug, Clone)]
pub struct EdgeHostnameResource {
    target: String,
}

impl EdgeHostnameResource {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl MembershipResource for EdgeHostnameResource {
    type Collection = EdgeHostnameList;

    const KIND: &'static str = "edge hostname";

    fn path(&self) -> String {
        EDGE_HOSTNAMES_PATH.to_string()
    }

    fn target(&self) -> &str {
        &self.target
    }

    fn members(collection: &EdgeHostnameList) -> impl Iterator<Item = &str> {
        collection
            .edge_hostnames
            .iter()
            .map(|entry| entry.edge_hostname.as_str())
    }
}
