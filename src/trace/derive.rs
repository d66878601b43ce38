use super::EventRecord;

const NS_PER_US: f64 = 1_000.0;

/// Microsecond breakdown of where one event's time was spent.
///
/// `net_us` is whatever `total_us` is not explained by the calculation
/// window (receive, parse, queueing and send). Any missing timestamp makes
/// the affected values missing too.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatencyBreakdown {
    pub net_us: Option<f64>,
    pub calc_us: Option<f64>,
    pub total_us: Option<f64>,
}

impl LatencyBreakdown {
    /// No ordering check: a clock that runs backwards shows up as a
    /// negative latency, which is exactly what the report should expose.
    pub fn from_record(rec: &EventRecord) -> Self {
        let calc_ns = elapsed(rec.t_calc_start, rec.t_calc_end);
        let total_ns = elapsed(rec.t_recv, rec.t_sent);
        let net_ns = elapsed(calc_ns, total_ns);

        Self {
            net_us: net_ns.map(|ns| ns / NS_PER_US),
            calc_us: calc_ns.map(|ns| ns / NS_PER_US),
            total_us: total_ns.map(|ns| ns / NS_PER_US),
        }
    }
}

/// `end - start`, missing if either side is.
fn elapsed(start: Option<f64>, end: Option<f64>) -> Option<f64> {
    Some(end? - start?)
}

/// A trace row with its derived latencies attached.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyRow {
    pub record: EventRecord,
    pub latency: LatencyBreakdown,
}

/// Attach derived latencies to every record, preserving input order.
pub fn derive_all(records: Vec<EventRecord>) -> Vec<LatencyRow> {
    records
        .into_iter()
        .map(|record| LatencyRow {
            latency: LatencyBreakdown::from_record(&record),
            record,
        })
        .collect()
}
