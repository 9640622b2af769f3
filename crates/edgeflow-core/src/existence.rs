//! Poll a collection until a member appears

use crate::error::{CoreError, Result};
use crate::poll::{PollConfig, PollReport, Progress, poll_until};
use crate::reconciler::Reconciler;
use crate::resource::MembershipResource;
use edgeflow_client::{Method, Transport};

impl<T: Transport> Reconciler<T> {
    /// Wait until `resource.target()` is listed in its collection
    pub async fn await_membership<M, P>(
        &self,
        resource: &M,
        poll: &PollConfig,
        progress: &mut P,
    ) -> Result<PollReport>
    where
        M: MembershipResource,
        P: Progress + ?Sized,
    {
        let collection_path = resource.path();
        let path = collection_path.as_str();

        poll_until(poll, &resource.describe(), progress, move || async move {
            let body = self.transport().send(Method::Get, path, None).await?;
            let collection: M::Collection =
                serde_json::from_slice(&body).map_err(|source| CoreError::Decode {
                    what: M::KIND,
                    source,
                })?;

            let target = resource.target();
            Ok(M::members(&collection).any(|member| member == target))
        })
        .await
    }
}
