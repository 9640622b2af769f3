//! Resource adapters
//!
//! A resource describes where its state lives and what it looks like; the
//! engine in [`crate::reconciler`] does the HTTP and the polling.

use crate::model::{ConfigId, Version};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub mod botman;
pub mod cookie;
pub mod edge_hostname;

pub use botman::{BotManagementResource, BotManagementSettings};
pub use cookie::{CookieSettings, CookieSettingsResource};
pub use edge_hostname::{EdgeHostname, EdgeHostnameList, EdgeHostnameResource};

/// Settings document stored on a configuration version
///
/// The same path is used to write (`PUT`) and read back (`GET`) the
/// document. Convergence is decided by `State: PartialEq`, so fields the
/// server adds to the response must be ignored by deserialization.
pub trait SettingsResource: Send + Sync {
    type State: Serialize + DeserializeOwned + PartialEq + Debug + Send + Sync;

    /// Short name used in logs and error messages
    const KIND: &'static str;

    fn config_id(&self) -> &ConfigId;

    /// Path of the settings document on `version`
    fn settings_path(&self, version: Version) -> String;

    fn describe(&self, version: Version) -> String {
        format!("{} for config {} v{}", Self::KIND, self.config_id(), version)
    }
}

/// Collection that should eventually contain a named member
pub trait MembershipResource: Send + Sync {
    type Collection: DeserializeOwned;

    const KIND: &'static str;

    fn path(&self) -> String;

    /// Member to wait for; compared exactly, including case
    fn target(&self) -> &str;

    fn members(collection: &Self::Collection) -> impl Iterator<Item = &str>;

    fn describe(&self) -> String {
        format!("{} '{}'", Self::KIND, self.target())
    }
}

pub(crate) fn versions_path(config_id: &ConfigId) -> String {
    format!("/appsec/v1/configs/{}/versions", config_id)
}

pub(crate) fn version_path(config_id: &ConfigId, version: Version) -> String {
    format!("{}/{}", versions_path(config_id), version)
}
