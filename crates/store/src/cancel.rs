//! Cancellation for superseded requests.
//!
//! Every search or date lookup takes a fresh [`CancellationToken`] from a
//! [`LatestOnly`] slot, which cancels whatever token it handed out before.
//! A cancelled request resolves to [`ClinicError::Cancelled`] and its
//! response is never applied.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clinicdesk_core::errors::{ClinicError, ClinicResult};
use tokio::sync::{Mutex, Notify};

#[derive(Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            // Registered before the flag check so a concurrent cancel is not missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Drives `request` unless the token is cancelled first.
    pub async fn run<T, F>(&self, request: F) -> ClinicResult<T>
    where
        F: Future<Output = ClinicResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(ClinicError::Cancelled),
            result = request => {
                if self.is_cancelled() {
                    Err(ClinicError::Cancelled)
                } else {
                    result
                }
            }
        }
    }
}

/// Hands out tokens such that only the most recent one stays live.
#[derive(Default)]
pub struct LatestOnly {
    current: Mutex<CancellationToken>,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn begin(&self) -> CancellationToken {
        let mut current = self.current.lock().await;
        current.cancel();
        *current = CancellationToken::new();
        current.clone()
    }

    pub async fn cancel(&self) {
        self.current.lock().await.cancel();
    }
}
