//! Shared utilities for use cases.
//!
//! Cancellation and deadline handling for every outbound call made while
//! serving one request (model sends and tool executions).

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why an outbound call was abandoned
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation token plus an optional absolute deadline, shared by every
/// call made on behalf of one request.
#[derive(Debug, Clone)]
pub struct CallGuard {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallGuard {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Guard that never interrupts. Mostly for tests.
    pub fn unbounded() -> Self {
        Self::new(CancellationToken::new())
    }

    /// Set the deadline `timeout` from now. `None`, or a timeout too large to
    /// represent as an instant, leaves it unbounded.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Fail fast if already cancelled or past the deadline.
    pub fn check(&self) -> Result<(), Interruption> {
        if self.token.is_cancelled() {
            return Err(Interruption::Cancelled);
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(Interruption::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drive `fut` to completion unless cancellation or the deadline wins.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Interruption> {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Interruption::Cancelled),
            _ = deadline => Err(Interruption::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_completes() {
        let guard = CallGuard::unbounded();
        assert_eq!(guard.run(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let guard = CallGuard::new(token);
        assert_eq!(guard.check(), Err(Interruption::Cancelled));
        assert_eq!(guard.run(async { 7 }).await, Err(Interruption::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_while_pending() {
        let token = CancellationToken::new();
        let guard = CallGuard::new(token.clone());
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });
        let result = guard.run(std::future::pending::<()>()).await;
        assert_eq!(result, Err(Interruption::Cancelled));
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let guard = CallGuard::unbounded().with_timeout(Some(Duration::from_millis(10)));
        let result = guard.run(std::future::pending::<()>()).await;
        assert_eq!(result, Err(Interruption::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_unrepresentable_timeout_is_unbounded() {
        let guard = CallGuard::unbounded().with_timeout(Some(Duration::from_secs(u64::MAX)));
        assert_eq!(guard.check(), Ok(()));
        assert_eq!(guard.run(async { 7 }).await, Ok(7));
    }
}
