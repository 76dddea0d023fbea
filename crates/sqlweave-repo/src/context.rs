//! Per-call deadlines.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{RepoError, Result};

/// Carries an optional deadline through every back-end call of an operation.
///
/// Operations accept `Option<&Context>`; `None` behaves like
/// [`Context::background`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    deadline: Option<Instant>,
}

impl Context {
    /// A context without deadline.
    #[must_use]
    pub const fn background() -> Self {
        Self { deadline: None }
    }

    /// A context expiring `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context expiring at `deadline`.
    #[must_use]
    pub const fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true once the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Drives `fut` to completion unless the deadline passes first.
    ///
    /// An already expired context never polls `fut`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::DeadlineExceeded`] when the deadline wins.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output> {
        match self.deadline {
            None => Ok(fut.await),
            Some(_) if self.is_expired() => Err(RepoError::DeadlineExceeded),
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| RepoError::DeadlineExceeded),
        }
    }
}
