//! Answer countdown.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A single-shot countdown running as a tokio task. When the duration
/// elapses the expiry future runs once; `cancel` stops it beforehand.
#[derive(Debug)]
pub struct Countdown {
    attempt: u64,
    handle: JoinHandle<()>,
}

impl Countdown {
    pub fn start<F>(duration: Duration, attempt: u64, on_expire: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            on_expire.await;
        });
        Self { attempt, handle }
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Stop the countdown. A no-op if it already fired.
    pub fn cancel(self) {
        self.handle.abort();
    }
}
