use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;

/// Pacing and retry settings for requests sent through a [`RequestQueue`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Wait before every attempt, so consecutive requests are at least this far apart.
    pub request_delay: Duration,
    /// Base backoff after a failed attempt; attempt `n` waits `retry_delay * n`.
    pub retry_delay: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_millis(1000),
            retry_delay: Duration::from_millis(2000),
            max_attempts: 3,
        }
    }
}

impl RetryPolicy {
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay * attempt
    }
}

/// Serializes requests: one in flight at a time, served in arrival order.
///
/// The gate is held for the whole retry loop of a request, so a failing request
/// delays everything queued behind it until it succeeds or gives up.
pub struct RequestQueue {
    gate: Mutex<()>,
    policy: RetryPolicy,
}

impl RequestQueue {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            gate: Mutex::new(()),
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` once its turn comes, retrying failures per the policy.
    ///
    /// Returns the last error once all attempts are used up.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let _turn = self.gate.lock().await;
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            tokio::time::sleep(self.policy.request_delay).await;

            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= max_attempts => {
                    tracing::error!(
                        request = label,
                        attempts = attempt,
                        error = %e,
                        "Request failed after all attempts"
                    );
                    return Err(e);
                }
                Err(e) => {
                    let backoff = self.policy.backoff(attempt);
                    tracing::warn!(
                        request = label,
                        attempt = attempt,
                        retries_remaining = max_attempts - attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}
