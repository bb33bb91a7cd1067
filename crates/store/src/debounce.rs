use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Collapses bursts of calls into the last one.
///
/// Each caller waits out the quiet period; only the caller that was not
/// overtaken during its wait gets `true` back.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn settle(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.generation.load(Ordering::SeqCst) == generation
    }
}
