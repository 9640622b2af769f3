//! Console progress output

use colored::Colorize;
use edgeflow_core::{CoreError, Elapsed, PollReport, Progress, Step, Version};
use std::time::Duration;

/// Progress lines for a resolve → push → verify run
pub struct SettingsProgress {
    kind: &'static str,
}

impl SettingsProgress {
    /// `kind` names the settings in the push step, e.g. "cookie settings"
    pub fn new(kind: &'static str) -> Self {
        Self { kind }
    }

    fn step_line(&self, step: Step) -> String {
        match step {
            Step::ResolveVersion => "Fetching latest config version".to_string(),
            Step::ApplySettings => format!("Pushing {}", self.kind),
            Step::VerifyState => "Verifying remote state".to_string(),
        }
    }
}

impl Progress for SettingsProgress {
    fn step(&mut self, step: Step) {
        println!(
            "{} {}",
            format!("Step {}:", step.number()).cyan().bold(),
            self.step_line(step)
        );
    }

    fn version_resolved(&mut self, version: Version) {
        println!("Latest Version Found: {}", version.to_string().green());
    }

    fn attempt(&mut self, _attempt: u32, elapsed: Duration) {
        println!("Verifying state ... {}", Elapsed(elapsed));
    }

    fn mismatch(&mut self, _attempt: u32) {
        println!("   -> {}", "Not applied yet".yellow());
    }

    fn fetch_failed(&mut self, _attempt: u32, error: &CoreError) {
        println!("   -> {} {}", "Fetch failed:".yellow(), error);
    }

    fn converged(&mut self, _report: &PollReport) {
        println!("{}", "SUCCESS: Settings verified.".green().bold());
    }
}

/// Progress lines while waiting for an edge hostname
pub struct WaiterProgress {
    hostname: String,
}

impl WaiterProgress {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }

    pub fn header(&self, timeout: Duration, interval: Duration) {
        println!(
            "Waiting for Edge Hostname '{}' to appear in the account",
            self.hostname.cyan()
        );
        println!(
            "Timeout: {}m | Interval: {}s",
            timeout.as_secs() / 60,
            interval.as_secs()
        );
    }
}

impl Progress for WaiterProgress {
    fn attempt(&mut self, _attempt: u32, elapsed: Duration) {
        println!("Checking status ... ({} elapsed)", Elapsed(elapsed));
    }

    fn mismatch(&mut self, _attempt: u32) {
        println!("   -> {}", "Not visible yet".yellow());
    }

    fn fetch_failed(&mut self, _attempt: u32, error: &CoreError) {
        println!("   -> {} {}", "Fetch failed:".yellow(), error);
    }

    fn converged(&mut self, _report: &PollReport) {
        println!(
            "{}",
            format!(
                "SUCCESS: Edge Hostname '{}' is created and visible.",
                self.hostname
            )
            .green()
            .bold()
        );
    }
}
