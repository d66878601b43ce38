use std::cmp::Ordering;

use crate::trace::LatencyRow;

/// The `n` slowest events by `total_us`.
///
/// Stable sort, so equal latencies keep input order. Rows with no
/// `total_us` rank below every defined value and only show up when there
/// are fewer than `n` defined rows.
pub fn slowest(rows: &[LatencyRow], n: usize) -> Vec<&LatencyRow> {
    let mut ranked: Vec<&LatencyRow> = rows.iter().collect();
    ranked.sort_by(|a, b| descending_missing_last(a.latency.total_us, b.latency.total_us));
    ranked.truncate(n);
    ranked
}

fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
