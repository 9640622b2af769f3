//! Resolve → mutate → verify
//!
//! [`Reconciler`] owns the transport. The individual stages live in
//! [`crate::resolver`], [`crate::mutator`], [`crate::convergence`] and
//! [`crate::existence`]; this module sequences them into one run.

use crate::error::{ReconcileError, Step};
use crate::model::Version;
use crate::poll::{PollConfig, PollReport, Progress};
use crate::resource::SettingsResource;
use edgeflow_client::Transport;

/// Outcome of a converged run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub version: Version,
    pub report: PollReport,
}

/// Engine bound to one transport
pub struct Reconciler<T> {
    transport: T,
}

impl<T: Transport> Reconciler<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Drive `resource` to `desired` and wait until the remote reports it
    ///
    /// The version is resolved once and reused for the write and every
    /// verification read. Resolution and the write are not retried.
    pub async fn reconcile<R, P>(
        &self,
        resource: &R,
        desired: &R::State,
        poll: &PollConfig,
        progress: &mut P,
    ) -> std::result::Result<Reconciliation, ReconcileError>
    where
        R: SettingsResource,
        P: Progress + ?Sized,
    {
        progress.step(Step::ResolveVersion);
        let version = self
            .resolve_version(resource.config_id())
            .await
            .map_err(|e| ReconcileError::new(Step::ResolveVersion, e))?;
        progress.version_resolved(version);

        progress.step(Step::ApplySettings);
        self.apply(resource, version, desired)
            .await
            .map_err(|e| ReconcileError::new(Step::ApplySettings, e))?;

        progress.step(Step::VerifyState);
        let report = self
            .await_convergence(resource, version, desired, poll, progress)
            .await
            .map_err(|e| ReconcileError::new(Step::VerifyState, e))?;

        Ok(Reconciliation { version, report })
    }
}
