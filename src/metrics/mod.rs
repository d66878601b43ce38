pub mod grouped;
pub mod percentiles;
pub mod ranking;

use crate::trace::LatencyRow;

pub use grouped::{group_by_updates, grouped_stats, Group, GroupStats, UpdateKey};
pub use percentiles::{PercentileSet, STAT_LABELS};
pub use ranking::slowest;

/// Column headers of the summary table, in display order.
pub const LATENCY_COLUMNS: [&str; 3] = ["net_us", "calc_us", "total_us"];

/// Rounded statistics for each derived latency over the whole trace.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub net_us: PercentileSet,
    pub calc_us: PercentileSet,
    pub total_us: PercentileSet,
}

impl SummaryStats {
    pub fn compute(rows: &[LatencyRow]) -> Self {
        let set = |pick: fn(&LatencyRow) -> Option<f64>| {
            PercentileSet::from_values(rows.iter().map(pick)).rounded()
        };

        Self {
            net_us: set(|r| r.latency.net_us),
            calc_us: set(|r| r.latency.calc_us),
            total_us: set(|r| r.latency.total_us),
        }
    }

    /// Sets in `LATENCY_COLUMNS` order.
    pub fn columns(&self) -> [&PercentileSet; 3] {
        [&self.net_us, &self.calc_us, &self.total_us]
    }
}
