use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::trace::LatencyRow;

use super::percentiles::PercentileSet;

// ─── Group key ───────────────────────────────────────────────────

/// A `num_updates` value usable as an ordered map key.
///
/// Always finite (missing keys never form a group) and never `-0.0`.
#[derive(Debug, Clone, Copy)]
pub struct UpdateKey(f64);

impl UpdateKey {
    pub fn new(value: f64) -> Option<Self> {
        // `+ 0.0` folds -0.0 into 0.0 so both land in one group
        value.is_finite().then(|| Self(value + 0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for UpdateKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for UpdateKey {}

impl PartialOrd for UpdateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UpdateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Integral keys print without decimals ("3", not "3.0").
impl fmt::Display for UpdateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

// ─── Partitioning ────────────────────────────────────────────────

/// All rows sharing one `num_updates` value, in input order.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub key: UpdateKey,
    pub rows: Vec<&'a LatencyRow>,
}

impl<'a> Group<'a> {
    pub fn total_us(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(|r| r.latency.total_us)
    }

    pub fn net_us(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(|r| r.latency.net_us)
    }
}

/// Partition rows by exact `num_updates`, ascending by key.
/// Rows without a key are left out.
pub fn group_by_updates(rows: &[LatencyRow]) -> Vec<Group<'_>> {
    let mut map: BTreeMap<UpdateKey, Vec<&LatencyRow>> = BTreeMap::new();
    for row in rows {
        if let Some(key) = row.record.num_updates.and_then(UpdateKey::new) {
            map.entry(key).or_default().push(row);
        }
    }

    map.into_iter()
        .map(|(key, rows)| Group { key, rows })
        .collect()
}

// ─── Grouped statistics ──────────────────────────────────────────

/// Network latency statistics for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub key: UpdateKey,
    pub net_us: PercentileSet,
}

/// One rounded `net_us` describe per group, same order as `groups`.
pub fn grouped_stats(groups: &[Group<'_>]) -> Vec<GroupStats> {
    groups
        .iter()
        .map(|g| GroupStats {
            key: g.key,
            net_us: PercentileSet::from_values(g.net_us()).rounded(),
        })
        .collect()
}
