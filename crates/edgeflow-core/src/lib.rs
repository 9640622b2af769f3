//! Reconcile-and-verify engine for edgeflow
//!
//! A run resolves the latest editable version of a configuration, writes the
//! desired settings to it, then polls the same version until the observed
//! state equals the desired state. A second loop waits for a named member to
//! show up in a collection.
//!
//! ```text
//!   Version Resolver ──▶ State Mutator ──▶ Convergence Poller
//!
//!   Existence Poller (standalone)
//! ```
//!
//! Resources plug in through [`SettingsResource`] and [`MembershipResource`];
//! every HTTP call goes through an [`edgeflow_client::Transport`].

pub mod convergence;
pub mod error;
pub mod existence;
pub mod model;
pub mod mutator;
pub mod poll;
pub mod reconciler;
pub mod resolver;
pub mod resource;

pub use error::{CoreError, ReconcileError, Result, Step};
pub use model::{ConfigId, ConfigVersion, PolicyId, Version};
pub use poll::{Elapsed, PollConfig, PollReport, Progress, Silent, poll_until};
pub use reconciler::{Reconciler, Reconciliation};
pub use resource::{
    BotManagementResource, BotManagementSettings, CookieSettings, CookieSettingsResource,
    EdgeHostname, EdgeHostnameList, EdgeHostnameResource, MembershipResource, SettingsResource,
};
