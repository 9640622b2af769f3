//! Poll a settings document until it matches

use crate::error::{CoreError, Result};
use crate::model::Version;
use crate::poll::{PollConfig, PollReport, Progress, poll_until};
use crate::reconciler::Reconciler;
use crate::resource::SettingsResource;
use edgeflow_client::{Method, Transport};

impl<T: Transport> Reconciler<T> {
    /// Read the current document of `resource` at `version`
    pub async fn fetch<R: SettingsResource>(
        &self,
        resource: &R,
        version: Version,
    ) -> Result<R::State> {
        let body = self
            .transport()
            .send(Method::Get, &resource.settings_path(version), None)
            .await?;

        serde_json::from_slice(&body).map_err(|source| CoreError::Decode {
            what: R::KIND,
            source,
        })
    }

    /// Wait until the observed document equals `desired`
    pub async fn await_convergence<R, P>(
        &self,
        resource: &R,
        version: Version,
        desired: &R::State,
        poll: &PollConfig,
        progress: &mut P,
    ) -> Result<PollReport>
    where
        R: SettingsResource,
        P: Progress + ?Sized,
    {
        poll_until(poll, &resource.describe(version), progress, move || async move {
            let observed = self.fetch(resource, version).await?;
            if observed != *desired {
                tracing::debug!("observed {:?}, want {:?}", observed, desired);
                return Ok(false);
            }
            Ok(true)
        })
        .await
    }
}
