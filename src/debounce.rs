//! Coalesce bursts of triggers into a single delayed action.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs the most recently supplied action once `quiet_period` has passed
/// without another call. Each call cancels whatever was still waiting.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub fn call<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let deadline = tokio::time::Instant::now() + self.quiet_period;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            action.await;
        }));
    }

    /// Drop the waiting action, if any. Returns whether one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use std::future::Future;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    fn recorder() -> Arc<Mutex<Vec<u32>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(
        fired: &Arc<Mutex<Vec<u32>>>,
        value: u32,
    ) -> impl Future<Output = ()> + Send + 'static {
        let fired = Arc::clone(fired);
        async move {
            fired.lock().unwrap().push(value);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_after_last_call() {
        let fired = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(250));

        debouncer.call(record(&fired, 1));
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.call(record(&fired, 2));
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.call(record(&fired, 3));
        settle().await;
        assert!(debouncer.is_pending());

        tokio::time::advance(Duration::from_millis(249)).await;
        settle().await;
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(*fired.lock().unwrap(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn separated_calls_each_fire() {
        let fired = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));

        debouncer.call(record(&fired, 1));
        tokio::time::advance(Duration::from_millis(60)).await;
        settle().await;
        debouncer.call(record(&fired, 2));
        tokio::time::advance(Duration::from_millis(60)).await;
        settle().await;

        assert_eq!(*fired.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_waiting_action() {
        let fired = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));

        debouncer.call(record(&fired, 1));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        tokio::time::advance(Duration::from_millis(100)).await;
        settle().await;

        assert!(fired.lock().unwrap().is_empty());
    }
}
