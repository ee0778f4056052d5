//! Input debouncing.
//!
//! Delays an action until input activity has paused for a fixed interval:
//! every new value supersedes the pending one, so rapid keystrokes collapse
//! to a single delivery after the quiescence window.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::sleep;

/// Collapses bursts of values into the last one.
#[derive(Clone)]
pub struct Debouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Waits out the quiescence window and returns `Some(value)` only when no
    /// newer value arrived meanwhile.
    pub async fn debounce<T>(&self, value: T) -> Option<T> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.window).await;
        if self.generation.load(Ordering::SeqCst) == my_generation {
            Some(value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_single_value_is_delivered() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        assert_eq!(debouncer.debounce("glow").await, Some("glow"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_inputs_collapse_to_the_last() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let first = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.debounce("g").await })
        };
        // Let the first call park inside its window before superseding it.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.debounce("gl").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let third = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.debounce("glo").await })
        };

        assert_eq!(first.await.unwrap(), None);
        assert_eq!(second.await.unwrap(), None);
        assert_eq!(third.await.unwrap(), Some("glo"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_separated_by_quiescence_both_deliver() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        assert_eq!(debouncer.debounce("first").await, Some("first"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(debouncer.debounce("second").await, Some("second"));
    }
}
