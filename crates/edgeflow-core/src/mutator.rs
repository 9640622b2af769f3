//! Settings write

use crate::error::{CoreError, Result};
use crate::model::Version;
use crate::reconciler::Reconciler;
use crate::resource::SettingsResource;
use edgeflow_client::{Method, Transport};

impl<T: Transport> Reconciler<T> {
    /// `PUT` the full desired document to `version`
    ///
    /// A successful response only means the write was accepted; use
    /// [`Reconciler::await_convergence`] to confirm it took effect.
    pub async fn apply<R: SettingsResource>(
        &self,
        resource: &R,
        version: Version,
        desired: &R::State,
    ) -> Result<()> {
        let body = serde_json::to_vec(desired).map_err(|source| CoreError::Encode {
            what: R::KIND,
            source,
        })?;

        let path = resource.settings_path(version);
        tracing::info!("Applying {}", resource.describe(version));
        tracing::debug!("PUT {} {}", path, String::from_utf8_lossy(&body));

        self.transport()
            .send(Method::Put, &path, Some(body))
            .await?;
        Ok(())
    }
}
