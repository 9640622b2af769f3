//! Tick-driven verification loop
//!
//! ```text
//!   Idle ──start──▶ Polling ──check ok + equal──▶ Converged
//!                    │  ▲
//!                    │  └── mismatch / fetch error (next tick)
//!                    └──── deadline ───────────▶ TimedOut
//! ```
//!
//! The first check runs one interval after entry. A tick scheduled at or
//! before the deadline is always checked before the deadline is observed, so
//! a check that converges on the final tick reports success. Ticks scheduled
//! after the deadline never run, and neither do ticks that only fire after it
//! because an earlier check was slow.

use crate::error::{CoreError, Result, Step};
use crate::model::Version;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Interval and deadline of a poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
    timeout: Duration,
}

impl PollConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CoreError::InvalidPollConfig(
                "interval must be greater than zero".to_string(),
            ));
        }
        if timeout.is_zero() {
            return Err(CoreError::InvalidPollConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(Self { interval, timeout })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Outcome of a converged loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    pub attempts: u32,
    pub mismatches: u32,
    pub fetch_errors: u32,
    pub elapsed: Duration,
}

/// Observer for run and loop events
///
/// Every method defaults to doing nothing, so implementors pick what they
/// display.
pub trait Progress {
    fn step(&mut self, _step: Step) {}

    fn version_resolved(&mut self, _version: Version) {}

    /// A tick fired and a check is about to run
    fn attempt(&mut self, _attempt: u32, _elapsed: Duration) {}

    fn mismatch(&mut self, _attempt: u32) {}

    fn fetch_failed(&mut self, _attempt: u32, _error: &CoreError) {}

    fn converged(&mut self, _report: &PollReport) {}
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {}

/// Duration rounded to whole seconds for display (`45s`, `5m0s`, `1h2m3s`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Elapsed(pub Duration);

impl Elapsed {
    pub fn whole_seconds(&self) -> u64 {
        let millis = self.0.as_millis();
        ((millis + 500) / 1000) as u64
    }
}

impl From<Duration> for Elapsed {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.whole_seconds();
        let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
        if hours > 0 {
            write!(f, "{}h{}m{}s", hours, minutes, seconds)
        } else if minutes > 0 {
            write!(f, "{}m{}s", minutes, seconds)
        } else {
            write!(f, "{}s", seconds)
        }
    }
}

struct PollSession {
    started_at: Instant,
    deadline: Instant,
    attempts: u32,
    mismatches: u32,
    fetch_errors: u32,
}

impl PollSession {
    fn start(config: &PollConfig) -> Self {
        let started_at = Instant::now();
        Self {
            started_at,
            deadline: started_at + config.timeout,
            attempts: 0,
            mismatches: 0,
            fetch_errors: 0,
        }
    }

    fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    fn report(&self) -> PollReport {
        PollReport {
            attempts: self.attempts,
            mismatches: self.mismatches,
            fetch_errors: self.fetch_errors,
            elapsed: self.elapsed(),
        }
    }

    fn timed_out(self, target: &str, timeout: Duration) -> CoreError {
        CoreError::Timeout {
            target: target.to_string(),
            timeout: Elapsed(timeout),
            attempts: self.attempts,
            mismatches: self.mismatches,
            fetch_errors: self.fetch_errors,
        }
    }
}

/// Run `check` on every tick until it returns `Ok(true)` or the deadline passes
///
/// `Ok(false)` and `Err(_)` both keep the loop polling; errors are logged and
/// counted separately from mismatches. Only the timeout is returned as an
/// error.
pub async fn poll_until<P, F, Fut>(
    config: &PollConfig,
    target: &str,
    progress: &mut P,
    mut check: F,
) -> Result<PollReport>
where
    P: Progress + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let mut session = PollSession::start(config);

    let mut ticker = time::interval_at(session.started_at + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let deadline = time::sleep_until(session.deadline);
    tokio::pin!(deadline);

    tracing::debug!(
        "Polling {} every {:?} for up to {:?}",
        target,
        config.interval,
        config.timeout
    );

    loop {
        tokio::select! {
            biased;

            scheduled = ticker.tick() => {
                // A tick delayed by a slow check may fire after the deadline
                // even though it was scheduled before it.
                if scheduled > session.deadline || Instant::now() > session.deadline {
                    break;
                }

                session.attempts += 1;
                let attempt = session.attempts;
                progress.attempt(attempt, session.elapsed());

                match check().await {
                    Ok(true) => {
                        let report = session.report();
                        tracing::info!(
                            "{} converged after {} checks ({})",
                            target,
                            report.attempts,
                            Elapsed(report.elapsed)
                        );
                        progress.converged(&report);
                        return Ok(report);
                    }
                    Ok(false) => {
                        session.mismatches += 1;
                        tracing::debug!("{}: check {} did not match", target, attempt);
                        progress.mismatch(attempt);
                    }
                    Err(e) => {
                        session.fetch_errors += 1;
                        tracing::warn!("{}: check {} failed: {}", target, attempt, e);
                        progress.fetch_failed(attempt, &e);
                    }
                }
            }

            () = &mut deadline => break,
        }
    }

    tracing::warn!(
        "{} did not converge within {} ({} checks)",
        target,
        Elapsed(config.timeout),
        session.attempts
    );
    Err(session.timed_out(target, config.timeout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeflow_client::ClientError;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_poll_config_rejects_zero() {
        assert!(PollConfig::new(Duration::ZERO, secs(10)).is_err());
        assert!(PollConfig::new(secs(1), Duration::ZERO).is_err());

        let config = PollConfig::new(secs(5), secs(300)).unwrap();
        assert_eq!(config.interval(), secs(5));
        assert_eq!(config.timeout(), secs(300));
    }

    #[test]
    fn test_elapsed_display() {
        assert_eq!(Elapsed(Duration::ZERO).to_string(), "0s");
        assert_eq!(Elapsed(Duration::from_millis(4_499)).to_string(), "4s");
        assert_eq!(Elapsed(Duration::from_millis(4_500)).to_string(), "5s");
        assert_eq!(Elapsed(secs(300)).to_string(), "5m0s");
        assert_eq!(Elapsed(secs(65)).to_string(), "1m5s");
        assert_eq!(Elapsed(secs(3_723)).to_string(), "1h2m3s");
    }

    #[tokio::test(start_paused = true)]
    async fn test_converges_on_first_matching_check() {
        let config = PollConfig::new(secs(5), secs(300)).unwrap();
        let mut observed = vec![false, false, true, true].into_iter();

        let report = poll_until(&config, "test", &mut Silent, || {
            let next = observed.next().unwrap_or(false);
            async move { Ok::<_, CoreError>(next) }
        })
        .await
        .unwrap();

        assert_eq!(report.attempts, 3);
        assert_eq!(report.mismatches, 2);
        assert_eq!(report.fetch_errors, 0);
        assert_eq!(Elapsed(report.elapsed).whole_seconds(), 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_check_waits_one_interval() {
        let config = PollConfig::new(secs(5), secs(300)).unwrap();

        let report = poll_until(&config, "test", &mut Silent, || async { Ok::<_, CoreError>(true) })
            .await
            .unwrap();

        assert_eq!(report.attempts, 1);
        assert_eq!(Elapsed(report.elapsed).whole_seconds(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_without_ticks_past_deadline() {
        let config = PollConfig::new(secs(1), secs(3)).unwrap();
        let mut checks = 0u32;

        let err = poll_until(&config, "test", &mut Silent, || {
            checks += 1;
            async { Ok::<_, CoreError>(false) }
        })
        .await
        .unwrap_err();

        assert_eq!(checks, 3);
        match err {
            CoreError::Timeout {
                attempts,
                mismatches,
                fetch_errors,
                timeout,
                ..
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(mismatches, 3);
                assert_eq!(fetch_errors, 0);
                assert_eq!(timeout, Elapsed(secs(3)));
            }
            other => panic!("expected Timeout, got: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_on_deadline_wins() {
        let config = PollConfig::new(secs(1), secs(3)).unwrap();
        let mut observed = vec![false, false, true].into_iter();

        let report = poll_until(&config, "test", &mut Silent, || {
            let next = observed.next().unwrap_or(false);
            async move { Ok::<_, CoreError>(next) }
        })
        .await
        .unwrap();

        assert_eq!(report.attempts, 3);
        assert_eq!(Elapsed(report.elapsed).whole_seconds(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_check_past_deadline_stops_the_loop() {
        let config = PollConfig::new(secs(1), secs(3)).unwrap();
        let started = Instant::now();
        let mut check_starts = Vec::new();

        let err = poll_until(&config, "test", &mut Silent, || {
            check_starts.push(started.elapsed());
            let converged = check_starts.len() >= 2;
            async move {
                time::sleep(Duration::from_millis(2_500)).await;
                Ok::<_, CoreError>(converged)
            }
        })
        .await
        .unwrap_err();

        let starts: Vec<u64> = check_starts
            .iter()
            .map(|start| Elapsed(*start).whole_seconds())
            .collect();
        assert_eq!(starts, vec![1]);
        match err {
            CoreError::Timeout {
                attempts,
                mismatches,
                ..
            } => {
                assert_eq!(attempts, 1);
                assert_eq!(mismatches, 1);
            }
            other => panic!("expected Timeout, got: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_checks_within_deadline_still_run() {
        let config = PollConfig::new(secs(1), secs(10)).unwrap();
        let mut checks = 0u32;

        let report = poll_until(&config, "test", &mut Silent, || {
            checks += 1;
            let converged = checks == 3;
            async move {
                time::sleep(Duration::from_millis(2_500)).await;
                Ok::<_, CoreError>(converged)
            }
        })
        .await
        .unwrap();

        assert_eq!(report.attempts, 3);
        assert_eq!(report.mismatches, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_need_not_divide_timeout() {
        let config = PollConfig::new(secs(2), secs(5)).unwrap();
        let mut checks = 0u32;

        let err = poll_until(&config, "test", &mut Silent, || {
            checks += 1;
            async { Ok::<_, CoreError>(false) }
        })
        .await
        .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(checks, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_do_not_stop_the_loop() {
        let config = PollConfig::new(secs(1), secs(60)).unwrap();
        let mut attempt = 0u32;

        let report = poll_until(&config, "test", &mut Silent, || {
            attempt += 1;
            let current = attempt;
            async move {
                match current {
                    1 => Err(CoreError::Transport(ClientError::Status {
                        status: 503,
                        reason: "Service Unavailable".to_string(),
                        body: String::new(),
                    })),
                    2 => Ok(false),
                    _ => Ok(true),
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(report.attempts, 3);
        assert_eq!(report.fetch_errors, 1);
        assert_eq!(report.mismatches, 1);
    }

    #[derive(Default)]
    struct Events {
        attempts: Vec<(u32, Duration)>,
        mismatches: Vec<u32>,
        failures: Vec<u32>,
        converged: Option<PollReport>,
    }

    impl Progress for Events {
        fn attempt(&mut self, attempt: u32, elapsed: Duration) {
            self.attempts.push((attempt, elapsed));
        }

        fn mismatch(&mut self, attempt: u32) {
            self.mismatches.push(attempt);
        }

        fn fetch_failed(&mut self, attempt: u32, _error: &CoreError) {
            self.failures.push(attempt);
        }

        fn converged(&mut self, report: &PollReport) {
            self.converged = Some(*report);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_sees_each_tick() {
        let config = PollConfig::new(secs(20), secs(1_800)).unwrap();
        let mut events = Events::default();
        let mut attempt = 0u32;

        poll_until(&config, "test", &mut events, || {
            attempt += 1;
            let current = attempt;
            async move {
                match current {
                    1 => Err(CoreError::InvalidPollConfig("boom".to_string())),
                    2 => Ok(false),
                    _ => Ok(true),
                }
            }
        })
        .await
        .unwrap();

        let seen: Vec<(u32, u64)> = events
            .attempts
            .iter()
            .map(|(attempt, elapsed)| (*attempt, Elapsed(*elapsed).whole_seconds()))
            .collect();
        assert_eq!(seen, vec![(1, 20), (2, 40), (3, 60)]);
        assert_eq!(events.failures, vec![1]);
        assert_eq!(events.mismatches, vec![2]);
        assert_eq!(events.converged.map(|r| r.attempts), Some(3));
    }
}
