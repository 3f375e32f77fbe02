//! Process-wide metrics for the NodeLift scheduler.
//!
//! - **`histogram`**: labelled duration histograms with drop-guard timers
//! - **`prometheus`**: text exposition for scraping
//!
//! The only process-wide metric is the scheduling duration histogram,
//! initialized once on first use and safe for concurrent observation from
//! simultaneous scheduling passes.

pub mod histogram;
pub mod prometheus;

pub use histogram::{DurationHistogram, DurationTimer, SeriesSnapshot, duration_buckets};
pub use prometheus::render_prometheus;

use std::sync::OnceLock;

static SCHEDULING_DURATION: OnceLock<DurationHistogram> = OnceLock::new();

/// Wall-clock duration of each scheduling pass, labelled by provisioner.
pub fn scheduling_duration() -> &'static DurationHistogram {
    SCHEDULING_DURATION.get_or_init(|| {
        DurationHistogram::new(
            "nodelift_scheduling_duration_seconds",
            "Duration of the scheduling pass in seconds, by provisioner.",
            "provisioner",
            duration_buckets(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_returns_same_instance() {
        let a = scheduling_duration() as *const DurationHistogram;
        let b = scheduling_duration() as *const DurationHistogram;
        assert_eq!(a, b);
    }
}
