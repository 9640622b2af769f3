//! Cookie settings of a security configuration

use super::{SettingsResource, version_path};
use crate::model::{ConfigId, Version};
use serde::{Deserialize, Serialize};

/// Cookie domain value that lets the platform pick the domain
pub const AUTOMATIC_COOKIE_DOMAIN: &str = "automatic";

/// Body of `.../advanced-settings/cookie-settings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieSettings {
    #[serde(default)]
    pub cookie_domain: String,
    #[serde(default)]
    pub use_all_secure_traffic: bool,
}

impl CookieSettings {
    pub fn automatic(use_all_secure_traffic: bool) -> Self {
        Self {
            cookie_domain: AUTOMATIC_COOKIE_DOMAIN.to_string(),
            use_all_secure_traffic,
        }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::automatic(true)
    }
}

#[derive(Debug, Clone)]
pub struct CookieSettingsResource {
    config_id: ConfigId,
}

impl CookieSettingsResource {
    pub fn new(config_id: ConfigId) -> Self {
        Self { config_id }
    }
}

impl SettingsResource for CookieSettingsResource {
    type State = CookieSettings;

    const KIND: &'static str = "cookie settings";

    fn config_id(&self) -> &ConfigId {
        &self.config_id
    }

    fn settings_path(&self, version: Version) -> String {
        format!(
            "{}/advanced-settings/cookie-settings",
            version_path(&self.config_id, version)
        )
    }
}
