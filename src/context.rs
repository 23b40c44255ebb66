// Cancellation + deadline context threaded through collectors and probes

use crate::error::CollectError;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Carries a cancellation signal and an optional absolute deadline.
///
/// Derived contexts (`with_timeout`) hold a child token, so cancelling a parent ends every
/// context derived from it. Blocking probe code polls [`Context::is_done`]; async code
/// awaits [`Context::done`].
#[derive(Debug, Clone)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    /// A context that is never cancelled unless someone calls [`Context::cancel`].
    pub fn background() -> Self {
        Self::from_token(CancellationToken::new())
    }

    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Child context ending at `now + timeout` or at the parent's deadline, whichever is first.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(parent) if parent < candidate => parent,
            _ => candidate,
        };
        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    /// Child context sharing the parent's deadline.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancels this context when the returned guard is dropped.
    pub fn cancel_on_drop(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    /// Why the context ended, or `None` while it is still live.
    pub fn err(&self) -> Option<CollectError> {
        if self.token.is_cancelled() {
            return Some(CollectError::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CollectError::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn check(&self) -> Result<(), CollectError> {
        match self.err() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> CollectError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => CollectError::Canceled,
                _ = tokio::time::sleep_until(deadline) => CollectError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                CollectError::Canceled
            }
        }
    }
}
