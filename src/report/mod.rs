pub mod page;
pub mod table;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::chart::build_histograms;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::metrics::{
    group_by_updates, grouped_stats, slowest, GroupStats, SummaryStats, LATENCY_COLUMNS,
    STAT_LABELS,
};
use crate::trace::LatencyRow;

pub use page::ReportPage;
pub use table::{escape_html, fmt_raw, fmt_value, HtmlTable};

/// Columns of the slowest-events and detailed tables.
pub const EVENT_COLUMNS: [&str; 10] = [
    "subject_id",
    "num_updates",
    "t_recv",
    "t_parsed",
    "t_calc_start",
    "t_calc_end",
    "t_sent",
    "net_us",
    "calc_us",
    "total_us",
];

/// CSS classes, one per table; also how tests find them in the page.
pub mod class {
    pub const SUMMARY: &str = "summary";
    pub const SLOWEST: &str = "slowest";
    pub const GROUPED: &str = "grouped";
    pub const DETAILED: &str = "detailed";
}

// ─── Tables ──────────────────────────────────────────────────────

/// Statistic per row, one column per derived latency.
pub fn summary_table(stats: &SummaryStats) -> HtmlTable {
    let mut table = HtmlTable::new(class::SUMMARY, LATENCY_COLUMNS).with_index("");
    let columns = stats.columns().map(|set| set.cells());

    for (i, label) in STAT_LABELS.iter().enumerate() {
        let cells = columns.iter().map(|col| fmt_value(col[i])).collect();
        table.push_indexed_row(*label, cells);
    }
    table
}

/// One row per `num_updates` group over `net_us`.
pub fn grouped_table(stats: &[GroupStats]) -> HtmlTable {
    let mut table = HtmlTable::new(class::GROUPED, STAT_LABELS).with_index("num_updates");
    for group in stats {
        let cells = group.net_us.cells().into_iter().map(fmt_value).collect();
        table.push_indexed_row(group.key.to_string(), cells);
    }
    table
}

/// Raw readings plus derived latencies, one row per event.
pub fn events_table<'a, I>(class: &str, rows: I) -> HtmlTable
where
    I: IntoIterator<Item = &'a LatencyRow>,
{
    let mut table = HtmlTable::new(class, EVENT_COLUMNS);
    for row in rows {
        table.push_row(event_cells(row));
    }
    table
}

fn event_cells(row: &LatencyRow) -> Vec<String> {
    let rec = &row.record;
    let lat = &row.latency;
    vec![
        rec.subject_id.clone(),
        fmt_raw(rec.num_updates),
        fmt_raw(rec.t_recv),
        fmt_raw(rec.t_parsed),
        fmt_raw(rec.t_calc_start),
        fmt_raw(rec.t_calc_end),
        fmt_raw(rec.t_sent),
        fmt_value(lat.net_us),
        fmt_value(lat.calc_us),
        fmt_value(lat.total_us),
    ]
}

// ─── Whole report ────────────────────────────────────────────────

/// A rendered page and the number of `num_updates` groups it covers.
#[derive(Debug, Clone)]
pub struct Report {
    pub html: String,
    pub groups: usize,
}

/// Compute every table and histogram for `rows` and render the page.
///
/// Pure apart from logging: the same rows and timestamp always give the
/// same document.
pub fn build_report(
    rows: &[LatencyRow],
    cfg: &ReportConfig,
    generated_at: DateTime<Utc>,
) -> Result<Report> {
    if rows.is_empty() {
        warn!("trace has no rows, rendering an empty report");
    }

    info!("computing latency stats");
    let summary = SummaryStats::compute(rows);
    let groups = group_by_updates(rows);
    let per_group = grouped_stats(&groups);

    let unkeyed = rows.len() - groups.iter().map(|g| g.rows.len()).sum::<usize>();
    if unkeyed > 0 {
        warn!(rows = unkeyed, "rows without num_updates are left out of the grouped stats");
    }
    let incomplete = rows.iter().filter(|r| r.latency.total_us.is_none()).count();
    if incomplete > 0 {
        warn!(rows = incomplete, "rows with a missing total_us");
    }

    info!(groups = groups.len(), "creating histograms per num_updates group");
    let histograms = build_histograms(&groups, cfg)?;

    let page = ReportPage {
        generated_at,
        row_count: rows.len(),
        summary: summary_table(&summary),
        top_n: cfg.top_n,
        slowest: events_table(class::SLOWEST, slowest(rows, cfg.top_n)),
        grouped: grouped_table(&per_group),
        histograms: &histograms,
        detailed: events_table(class::DETAILED, rows),
        image_width: cfg.display_width,
    };
    Ok(Report {
        html: page.render(),
        groups: groups.len(),
    })
}
