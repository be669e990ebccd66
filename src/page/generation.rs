use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::error::AppError;

/// Identifies one load started through a [`LoadGeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadStamp(u64);

impl LoadStamp {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic load counter shared by a page and anything that can trigger a
/// new load for it.
///
/// Only the most recently started load may publish its data.
#[derive(Debug, Clone, Default)]
pub struct LoadGeneration {
    current: Arc<AtomicU64>,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoadStamp {
        LoadStamp(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, stamp: LoadStamp) -> bool {
        self.current() == stamp.0
    }

    /// Fails with [`AppError::StaleLoad`] once a newer load has begun.
    pub fn check(&self, stamp: LoadStamp) -> Result<(), AppError> {
        let current = self.current();
        if current == stamp.0 {
            return Ok(());
        }

        tracing::warn!(stamp = stamp.0, current, "discarding stale load");

        Err(AppError::StaleLoad {
            stamp: stamp.0,
            current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_stamp_is_current() {
        let generation = LoadGeneration::new();

        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert!(first < second);
    }

    #[test]
    fn test_clones_share_the_counter() {
        let generation = LoadGeneration::new();
        let handle = generation.clone();

        let stamp = generation.begin();
        handle.begin();

        assert!(matches!(
            generation.check(stamp),
            Err(AppError::StaleLoad {
                stamp: 1,
                current: 2
            })
        ));
    }
}
