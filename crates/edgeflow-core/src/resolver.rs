//! Latest editable version lookup

use crate::error::{CoreError, Result};
use crate::model::{ConfigId, ConfigVersion, Version};
use crate::reconciler::Reconciler;
use crate::resource::versions_path;
use edgeflow_client::{Method, Transport};

impl<T: Transport> Reconciler<T> {
    /// Fetch `lastCreatedVersion` of `config_id`
    pub async fn resolve_version(&self, config_id: &ConfigId) -> Result<Version> {
        let body = self
            .transport()
            .send(Method::Get, &versions_path(config_id), None)
            .await?;

        let versions: ConfigVersion =
            serde_json::from_slice(&body).map_err(|source| CoreError::Decode {
                what: "config version",
                source,
            })?;

        let version = Version::new(versions.last_created_version).ok_or_else(|| {
            CoreError::InvalidVersion {
                config_id: config_id.to_string(),
                version: versions.last_created_version,
            }
        })?;

        tracing::info!("Config {} latest version: {}", config_id, version);
        Ok(version)
    }
}
