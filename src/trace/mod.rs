pub mod derive;
pub mod loader;

use serde::Deserialize;

pub use derive::{derive_all, LatencyBreakdown, LatencyRow};
pub use loader::{load_trace, read_trace, REQUIRED_COLUMNS};

/// One line of the latency trace, as written by the trading pipeline.
///
/// Timestamps are raw clock readings (nanoseconds). Every numeric field is
/// optional: a cell that does not parse as a finite number is kept as `None`
/// instead of failing the load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventRecord {
    pub subject_id: String,

    /// How many book updates fed this event; the grouping key
    #[serde(deserialize_with = "csv::invalid_option")]
    pub num_updates: Option<f64>,

    /// Packet received
    #[serde(deserialize_with = "csv::invalid_option")]
    pub t_recv: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub t_parsed: Option<f64>,
    /// Composite score calculation window
    #[serde(deserialize_with = "csv::invalid_option")]
    pub t_calc_start: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub t_calc_end: Option<f64>,
    /// Result handed to the TCP sender
    #[serde(deserialize_with = "csv::invalid_option")]
    pub t_sent: Option<f64>,
}

impl EventRecord {
    /// `f64::from_str` accepts "NaN" and "inf"; neither is a usable
    /// measurement, so fold them into missing as well.
    pub(crate) fn drop_non_finite(mut self) -> Self {
        for field in [
            &mut self.num_updates,
            &mut self.t_recv,
            &mut self.t_parsed,
            &mut self.t_calc_start,
            &mut self.t_calc_end,
            &mut self.t_sent,
        ] {
            *field = (*field).filter(|v| v.is_finite());
        }
        self
    }
}
