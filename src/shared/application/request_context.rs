/// Per-request cancellation and deadline handle
///
/// One context is created per inbound request and passed by reference through
/// the service, the edge store and every gateway call. Each suspension point
/// checks it before starting work and races in-flight work against it.
use crate::shared::errors::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context with no deadline, cancelled only through its token
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.is_expired()
    }

    fn is_expired(&self) -> bool {
        self.deadline
            .map(|deadline| Instant::now() >= deadline)
            .unwrap_or(false)
    }

    /// Time left before the deadline, `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fail fast with `Cancelled` if the caller already gave up
    pub fn ensure_active(&self, operation: &str) -> AppResult<()> {
        if self.token.is_cancelled() {
            return Err(AppError::Cancelled(format!("{} operation canceled", operation)));
        }
        if self.is_expired() {
            return Err(AppError::Cancelled(format!(
                "{} operation deadline exceeded",
                operation
            )));
        }
        Ok(())
    }

    /// Run a suspension point, returning `Cancelled` as soon as the token fires
    /// or the deadline passes
    pub async fn run<T, F>(&self, operation: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.ensure_active(operation)?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                Err(AppError::Cancelled(format!("{} operation canceled", operation)))
            }
            _ = deadline => {
                Err(AppError::Cancelled(format!("{} operation deadline exceeded", operation)))
            }
            result = fut => result,
        }
    }
}
