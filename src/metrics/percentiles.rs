/// Row labels of a describe table, in display order.
pub const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "50%", "90%", "99%", "max"];

/// Descriptive statistics for one latency column.
/// Rendered as a column of the summary table or a row of the grouped table.
///
/// Missing inputs are skipped. With no defined inputs every statistic but
/// `count` is `None`; `std` additionally needs at least two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileSet {
    pub count: u64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p50: Option<f64>,
    pub p90: Option<f64>,
    pub p99: Option<f64>,
    pub max: Option<f64>,
}

impl PercentileSet {
    /// Compute the full set over whatever values are defined.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut sorted: Vec<f64> = values.into_iter().flatten().collect();
        if sorted.is_empty() {
            return Self::empty();
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std = (sorted.len() > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        });

        Self {
            count: sorted.len() as u64,
            mean: Some(mean),
            std,
            min: sorted.first().copied(),
            p50: percentile(&sorted, 50.0),
            p90: percentile(&sorted, 90.0),
            p99: percentile(&sorted, 99.0),
            max: sorted.last().copied(),
        }
    }

    /// Zero count, everything else undefined.
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            std: None,
            min: None,
            p50: None,
            p90: None,
            p99: None,
            max: None,
        }
    }

    /// Convenience: is this set backed by at least one observation?
    pub fn has_data(&self) -> bool {
        self.count > 0
    }

    /// Same set with every value rounded to 2 decimals.
    pub fn rounded(&self) -> Self {
        let r = |v: Option<f64>| v.map(round2);
        Self {
            count: self.count,
            mean: r(self.mean),
            std: r(self.std),
            min: r(self.min),
            p50: r(self.p50),
            p90: r(self.p90),
            p99: r(self.p99),
            max: r(self.max),
        }
    }

    /// Values in `STAT_LABELS` order.
    pub fn cells(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.p50,
            self.p90,
            self.p99,
            self.max,
        ]
    }
}

/// Percentile `p` (0-100) of an ascending slice, linearly interpolated
/// between the two closest ranks.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Round to 2 decimals, ties to even.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
