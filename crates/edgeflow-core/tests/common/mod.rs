use async_trait::async_trait;
use edgeflow_client::{ClientError, Method, Transport};
use edgeflow_core::{CoreError, PollReport, Progress, Step, Version};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted response for one call
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    Json(serde_json::Value),
    Raw(&'static str),
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// In-memory transport that replays scripted replies per route
///
/// Replies for a route are consumed in order; the last one repeats. Calls to
/// an unscripted route get a 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn on(self, method: Method, path: &str, replies: impl IntoIterator<Item = Reply>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .extend(replies);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<Reply> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> edgeflow_client::Result<Vec<u8>> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body: body.map(|bytes| serde_json::from_slice(&bytes).unwrap()),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply(method, path) {
            Some(Reply::Json(value)) => Ok(serde_json::to_vec(&value).unwrap()),
            Some(Reply::Raw(text)) => Ok(text.as_bytes().to_vec()),
            Some(Reply::Status(status)) => Err(ClientError::Status {
                status,
                reason: "Scripted".to_string(),
                body: String::new(),
            }),
            None => Err(ClientError::Status {
                status: 404,
                reason: "Not Found".to_string(),
                body: format!("no route for {} {}", method, path),
            }),
        }
    }
}

/// Progress observer that keeps every event
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct Recorder {
    pub steps: Vec<Step>,
    pub version: Option<Version>,
    pub attempts: Vec<u32>,
    pub mismatches: Vec<u32>,
    pub failures: Vec<(u32, String)>,
    pub converged: Option<PollReport>,
}

impl Progress for Recorder {
    fn step(&mut self, step: Step) {
        self.steps.push(step);
    }

    fn version_resolved(&mut self, version: Version) {
        self.version = Some(version);
    }

    fn attempt(&mut self, attempt: u32, _elapsed: Duration) {
        self.attempts.push(attempt);
    }

    fn mismatch(&mut self, attempt: u32) {
        self.mismatches.push(attempt);
    }

    fn fetch_failed(&mut self, attempt: u32, error: &CoreError) {
        self.failures.push((attempt, error.to_string()));
    }

    fn converged(&mut self, report: &PollReport) {
        self.converged = Some(*report);
    }
}

#[allow(dead_code)]
pub fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}
