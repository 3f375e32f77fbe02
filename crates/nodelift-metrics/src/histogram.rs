//! Labelled duration histograms with drop-guard timers.
//!
//! A `DurationHistogram` keeps one series per label value behind a mutex.
//! Observation is a handful of integer increments, so a plain
//! `std::sync::Mutex` is enough even with concurrent scheduling passes.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Bucket upper bounds in seconds for scheduling-scale durations,
/// log-spaced from 1ms to two minutes.
pub fn duration_buckets() -> Vec<f64> {
    vec![
        0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0,
        120.0,
    ]
}

struct Series {
    /// Per-bucket (non-cumulative) observation counts.
    bucket_counts: Vec<u64>,
    sum: f64,
    count: u64,
}

impl Series {
    fn new(buckets: usize) -> Self {
        Self {
            bucket_counts: vec![0; buckets],
            sum: 0.0,
            count: 0,
        }
    }
}

/// A point-in-time copy of one label's series, for exposition.
#[derive(Debug, Clone)]
pub struct SeriesSnapshot {
    pub label: String,
    /// Per-bucket counts aligned with the histogram's bucket bounds.
    pub bucket_counts: Vec<u64>,
    pub sum: f64,
    pub count: u64,
}

/// A histogram of durations in seconds, partitioned by one label key.
pub struct DurationHistogram {
    name: &'static str,
    help: &'static str,
    label_key: &'static str,
    buckets: Vec<f64>,
    series: Mutex<HashMap<String, Series>>,
}

impl DurationHistogram {
    pub fn new(
        name: &'static str,
        help: &'static str,
        label_key: &'static str,
        buckets: Vec<f64>,
    ) -> Self {
        Self {
            name,
            help,
            label_key,
            buckets,
            series: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn help(&self) -> &'static str {
        self.help
    }

    pub fn label_key(&self) -> &'static str {
        self.label_key
    }

    /// Bucket upper bounds in seconds.
    pub fn buckets(&self) -> &[f64] {
        &self.buckets
    }

    /// Record one observation against the series for `label`.
    pub fn observe(&self, label: &str, seconds: f64) {
        let mut series = self.lock();
        let entry = series
            .entry(label.to_string())
            .or_insert_with(|| Series::new(self.buckets.len()));
        if let Some(bucket) = self.buckets.iter().position(|le| seconds <= *le) {
            entry.bucket_counts[bucket] += 1;
        }
        entry.sum += seconds;
        entry.count += 1;
    }

    /// Start a timer that records elapsed wall-clock time when dropped,
    /// so the observation happens on every return path.
    pub fn start_timer(&self, label: &str) -> DurationTimer<'_> {
        DurationTimer {
            histogram: self,
            label: label.to_string(),
            started: Instant::now(),
        }
    }

    /// Copy out all series, sorted by label for deterministic exposition.
    pub fn snapshot(&self) -> Vec<SeriesSnapshot> {
        let series = self.lock();
        let mut snapshots: Vec<SeriesSnapshot> = series
            .iter()
            .map(|(label, s)| SeriesSnapshot {
                label: label.clone(),
                bucket_counts: s.bucket_counts.clone(),
                sum: s.sum,
                count: s.count,
            })
            .collect();
        snapshots.sort_by(|a, b| a.label.cmp(&b.label));
        snapshots
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Series>> {
        // A poisoned series map only means a panic mid-increment; the
        // counts are still usable.
        self.series.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drop guard returned by [`DurationHistogram::start_timer`].
pub struct DurationTimer<'a> {
    histogram: &'a DurationHistogram,
    label: String,
    started: Instant,
}

impl Drop for DurationTimer<'_> {
    fn drop(&mut self) {
        self.histogram
            .observe(&self.label, self.started.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn test_histogram() -> DurationHistogram {
        DurationHistogram::new(
            "test_duration_seconds",
            "Test histogram.",
            "provisioner",
            vec![0.1, 1.0, 10.0],
        )
    }

    #[test]
    fn observe_lands_in_first_covering_bucket() {
        let h = test_histogram();
        h.observe("default", 0.05);
        h.observe("default", 0.5);
        h.observe("default", 100.0); // Above every bound.

        let snapshot = h.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].bucket_counts, vec![1, 1, 0]);
        assert_eq!(snapshot[0].count, 3);
        assert!((snapshot[0].sum - 100.55).abs() < 1e-9);
    }

    #[test]
    fn series_are_partitioned_by_label() {
        let h = test_histogram();
        h.observe("default", 0.05);
        h.observe("gpu", 0.05);
        h.observe("gpu", 0.05);

        let snapshot = h.snapshot();
        assert_eq!(snapshot.len(), 2);
        // Sorted by label.
        assert_eq!(snapshot[0].label, "default");
        assert_eq!(snapshot[0].count, 1);
        assert_eq!(snapshot[1].label, "gpu");
        assert_eq!(snapshot[1].count, 2);
    }

    #[test]
    fn timer_records_on_drop() {
        let h = test_histogram();
        {
            let _timer = h.start_timer("default");
        }
        assert_eq!(h.snapshot()[0].count, 1);
    }

    #[test]
    fn timer_records_on_early_return_paths() {
        let h = test_histogram();

        fn failing_pass(h: &DurationHistogram) -> Result<(), &'static str> {
            let _timer = h.start_timer("default");
            Err("injection failed")
        }

        assert!(failing_pass(&h).is_err());
        assert_eq!(h.snapshot()[0].count, 1);
    }

    #[tokio::test]
    async fn concurrent_observations_are_all_counted() {
        let h = Arc::new(test_histogram());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let h = Arc::clone(&h);
            handles.push(tokio::spawn(async move {
                for _ in 0..100 {
                    h.observe("default", 0.01);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(h.snapshot()[0].count, 800);
    }
}
