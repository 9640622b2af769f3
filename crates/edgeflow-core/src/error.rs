//! Engine error types

use crate::poll::Elapsed;
use edgeflow_client::ClientError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{kind} must not be empty")]
    EmptyIdentifier { kind: &'static str },

    #[error("Invalid poll configuration: {0}")]
    InvalidPollConfig(String),

    #[error("Error parsing desired state: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("could not parse {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode {what} payload: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("config {config_id} reported an invalid version: {version}")]
    InvalidVersion { config_id: String, version: i64 },

    #[error(transparent)]
    Transport(#[from] ClientError),

    #[error(
        "TIMEOUT: {target} did not converge within {timeout} \
         ({attempts} checks: {mismatches} mismatched, {fetch_errors} failed)"
    )]
    Timeout {
        target: String,
        timeout: Elapsed,
        attempts: u32,
        mismatches: u32,
        fetch_errors: u32,
    },
}

impl CoreError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Stage of a reconcile run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ResolveVersion,
    ApplySettings,
    VerifyState,
}

impl Step {
    /// 1-based position in the run
    pub fn number(&self) -> u8 {
        match self {
            Step::ResolveVersion => 1,
            Step::ApplySettings => 2,
            Step::VerifyState => 3,
        }
    }

    /// Diagnostic prefix when the run stops at this step
    pub fn failure_message(&self) -> &'static str {
        match self {
            Step::ResolveVersion => "Failed to get version",
            Step::ApplySettings => "Update failed",
            Step::VerifyState => "Verification failed",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::ResolveVersion => "resolve version",
            Step::ApplySettings => "apply settings",
            Step::VerifyState => "verify state",
        };
        f.write_str(name)
    }
}

/// A reconcile run that stopped at `step`
#[derive(Error, Debug)]
#[error("{}: {source}", .step.failure_message())]
pub struct ReconcileError {
    pub step: Step,
    #[source]
    pub source: CoreError,
}

impl ReconcileError {
    pub fn new(step: Step, source: CoreError) -> Self {
        Self { step, source }
    }
}
