use serde::Serialize;
use std::sync::Mutex;

/// Request counters shared by every handler.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub processed: usize,
    pub errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_processed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    /// Counts one call, splitting on its outcome.
    pub fn observe<T, E>(&self, outcome: &Result<T, E>) {
        match outcome {
            Ok(_) => self.record_processed(),
            Err(_) => self.record_error(),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().map(|metrics| *metrics).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_splits_successes_and_failures() {
        let metrics = MetricsRecorder::new();
        metrics.observe::<(), ()>(&Ok(()));
        metrics.observe::<(), ()>(&Ok(()));
        metrics.observe::<(), ()>(&Err(()));
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                processed: 2,
                errors: 1
            }
        );
    }
}
