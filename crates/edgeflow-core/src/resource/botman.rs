//! Bot management settings of a security policy

use super::{SettingsResource, version_path};
use crate::error::{CoreError, Result};
use crate::model::{ConfigId, PolicyId, Version};
use serde::{Deserialize, Serialize};

/// Body of `.../security-policies/{policyId}/bot-management-settings`
///
/// Missing flags default to `false`; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotManagementSettings {
    pub add_akamai_bot_header: bool,
    pub enable_active_detections: bool,
    pub enable_browser_validation: bool,
    pub enable_bot_management: bool,
    pub include_transactional_endpoint_requests: bool,
    pub include_transactional_endpoint_status: bool,
    pub remove_bot_management_cookies: bool,
    pub third_party_proxy_service_in_use: bool,
}

impl BotManagementSettings {
    /// Parse a desired state given as JSON text
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(CoreError::InvalidPayload)
    }
}

#[derive(Debug, Clone)]
pub struct BotManagementResource {
    config_id: ConfigId,
    policy_id: PolicyId,
}

impl BotManagementResource {
    pub fn new(config_id: ConfigId, policy_id: PolicyId) -> Self {
        Self {
            config_id,
            policy_id,
        }
    }

    pub fn policy_id(&self) -> &PolicyId {
        &self.policy_id
    }
}

impl SettingsResource for BotManagementResource {
    type State = BotManagementSettings;

    const KIND: &'static str = "bot management settings";

    fn config_id(&self) -> &ConfigId {
        &self.config_id
    }

    fn settings_path(&self, version: Version) -> String {
        format!(
            "{}/security-policies/{}/bot-management-settings",
            version_path(&self.config_id, version),
            self.policy_id
        )
    }

    fn describe(&self, version: Version) -> String {
        format!(
            "{} for policy {} (config {} v{})",
            Self::KIND,
            self.policy_id,
            self.config_id,
            version
        )
    }
}
