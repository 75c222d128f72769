use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Orders submissions and keeps the newest published result. A result whose
/// submission is older than the one already published is discarded, so a
/// slow render can never overwrite a newer one.
#[derive(Debug)]
pub struct SubmissionGuard<T> {
    next_seq: AtomicU64,
    published: RwLock<Option<(u64, T)>>,
}

impl<T> Default for SubmissionGuard<T> {
    fn default() -> Self {
        Self {
            next_seq: AtomicU64::new(1),
            published: RwLock::new(None),
        }
    }
}

impl<T: Clone> SubmissionGuard<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the sequence number of a new submission.
    pub fn begin(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    /// True while no later submission has begun.
    pub fn is_latest(&self, seq: u64) -> bool {
        self.next_seq.load(Ordering::SeqCst) == seq + 1
    }

    /// Stores `value` unless a newer submission has already been published.
    /// Returns whether it was stored.
    pub async fn publish(&self, seq: u64, value: T) -> bool {
        let mut guard = self.published.write().await;
        match guard.as_ref() {
            Some((current, _)) if *current > seq => false,
            _ => {
                *guard = Some((seq, value));
                true
            }
        }
    }

    pub async fn latest(&self) -> Option<(u64, T)> {
        self.published.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stale_result_does_not_overwrite_newer_one() {
        let guard = SubmissionGuard::<&str>::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(second > first);
        assert!(!guard.is_latest(first));
        assert!(guard.is_latest(second));

        assert!(guard.publish(second, "MSFT").await);
        assert!(!guard.publish(first, "AAPL").await);
        assert_eq!(guard.latest().await, Some((second, "MSFT")));
    }

    #[tokio::test]
    async fn in_order_results_replace_each_other() {
        let guard = SubmissionGuard::<&str>::new();
        assert_eq!(guard.latest().await, None);

        let first = guard.begin();
        assert!(guard.publish(first, "AAPL").await);
        let second = guard.begin();
        assert!(guard.publish(second, "MSFT").await);
        assert_eq!(guard.latest().await.map(|(_, v)| v), Some("MSFT"));
    }
}
