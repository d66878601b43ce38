use latency_report::metrics::{group_by_updates, grouped_stats, slowest, PercentileSet};
use latency_report::trace::{derive_all, EventRecord, LatencyRow};
use proptest::prelude::*;

prop_compose! {
    /// One event with ordered timestamps and an optional broken send time.
    fn arb_record()(
        recv in 0u64..1_000_000_000,
        parse in 0u64..50_000,
        queue in 0u64..50_000,
        calc in 0u64..100_000,
        send in 0u64..500_000,
        updates in 1u32..8,
        sent_missing in prop::bool::weighted(0.1),
    ) -> EventRecord {
        let t_recv = recv as f64;
        let t_parsed = t_recv + parse as f64;
        let t_calc_start = t_parsed + queue as f64;
        let t_calc_end = t_calc_start + calc as f64;
        let t_sent = t_calc_end + send as f64;
        EventRecord {
            subject_id: recv.to_string(),
            num_updates: Some(updates as f64),
            t_recv: Some(t_recv),
            t_parsed: Some(t_parsed),
            t_calc_start: Some(t_calc_start),
            t_calc_end: Some(t_calc_end),
            t_sent: (!sent_missing).then_some(t_sent),
        }
    }
}

fn arb_rows() -> impl Strategy<Value = Vec<LatencyRow>> {
    prop::collection::vec(arb_record(), 0..200).prop_map(derive_all)
}

proptest! {
    /// Property: total_us == net_us + calc_us whenever all three are defined
    #[test]
    fn prop_total_is_net_plus_calc(rows in arb_rows()) {
        for row in &rows {
            let lat = row.latency;
            match (lat.net_us, lat.calc_us, lat.total_us) {
                (Some(net), Some(calc), Some(total)) => {
                    prop_assert!((net + calc - total).abs() < 1e-6);
                }
                (None, Some(_), None) => prop_assert!(row.record.t_sent.is_none()),
                other => prop_assert!(false, "unexpected breakdown {:?}", other),
            }
        }
    }

    /// Property: top-N has min(N, len) rows, non-increasing, defined values first
    #[test]
    fn prop_slowest_is_ordered(rows in arb_rows(), n in 0usize..10) {
        let top = slowest(&rows, n);
        prop_assert_eq!(top.len(), n.min(rows.len()));

        let totals: Vec<Option<f64>> = top.iter().map(|r| r.latency.total_us).collect();
        for w in totals.windows(2) {
            match (w[0], w[1]) {
                (Some(a), Some(b)) => prop_assert!(a >= b),
                (None, Some(_)) => prop_assert!(false, "missing ranked above defined"),
                _ => {}
            }
        }
    }

    /// Property: every keyed row lands in exactly one group
    #[test]
    fn prop_groups_partition_rows(rows in arb_rows()) {
        let groups = group_by_updates(&rows);
        let grouped: usize = groups.iter().map(|g| g.rows.len()).sum();
        prop_assert_eq!(grouped, rows.len());

        let keys: Vec<f64> = groups.iter().map(|g| g.key.value()).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));

        let stats = grouped_stats(&groups);
        prop_assert_eq!(stats.len(), groups.len());
        let defined = rows.iter().filter(|r| r.latency.net_us.is_some()).count() as u64;
        prop_assert_eq!(stats.iter().map(|s| s.net_us.count).sum::<u64>(), defined);
    }

    /// Property: percentiles sit between min and max, in order
    #[test]
    fn prop_percentiles_are_monotone(values in prop::collection::vec(-1e6f64..1e6, 1..300)) {
        let set = PercentileSet::from_values(values.iter().copied().map(Some));
        let chain = [set.min, set.p50, set.p90, set.p99, set.max];
        for w in chain.windows(2) {
            prop_assert!(w[0].unwrap() <= w[1].unwrap() + 1e-9);
        }
        prop_assert_eq!(set.count, values.len() as u64);
    }
}
