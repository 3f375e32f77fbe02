//! Prometheus text exposition format.
//!
//! Renders a histogram snapshot into the Prometheus text exposition
//! format for scraping. Bucket counts are cumulative per the format, with
//! a final `+Inf` bucket equal to the series count.

use crate::histogram::DurationHistogram;

/// Render a histogram into Prometheus text format.
pub fn render_prometheus(histogram: &DurationHistogram) -> String {
    let name = histogram.name();
    let label_key = histogram.label_key();
    let mut out = String::new();

    out.push_str(&format!("# HELP {name} {}\n", histogram.help()));
    out.push_str(&format!("# TYPE {name} histogram\n"));

    for series in histogram.snapshot() {
        let mut cumulative = 0u64;
        for (le, count) in histogram.buckets().iter().zip(&series.bucket_counts) {
            cumulative += count;
            out.push_str(&format!(
                "{name}_bucket{{{label_key}=\"{}\",le=\"{le}\"}} {cumulative}\n",
                series.label
            ));
        }
        out.push_str(&format!(
            "{name}_bucket{{{label_key}=\"{}\",le=\"+Inf\"}} {}\n",
            series.label, series.count
        ));
        out.push_str(&format!(
            "{name}_sum{{{label_key}=\"{}\"}} {}\n",
            series.label, series.sum
        ));
        out.push_str(&format!(
            "{name}_count{{{label_key}=\"{}\"}} {}\n",
            series.label, series.count
        ));
    }

    out
}
