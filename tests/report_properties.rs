//! Property tests for the history and statement transforms.
//!
//! Uses proptest to verify:
//! 1. Moving averages are undefined before the window fills and equal the
//!    window mean afterwards
//! 2. History series are ascending by date whatever order bars arrive in
//! 3. Flattening yields one uniquely named field per leaf

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;
use serde_json::{json, Value};

use tickboard_core::flatten::{flatten, PATH_SEPARATOR};
use tickboard_core::indicators::{simple_moving_average, LONG_WINDOW, SHORT_WINDOW};
use tickboard_core::HistorySeries;
use tickboard_tests::bar;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_close() -> impl Strategy<Value = f64> {
    (1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_closes(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_close(), 0..max_len)
}

fn arb_statement() -> impl Strategy<Value = BTreeMap<String, BTreeMap<String, i64>>> {
    prop::collection::btree_map(
        "[a-z_]{1,12}",
        prop::collection::btree_map("[a-z_]{1,12}", any::<i64>(), 0..8),
        0..5,
    )
}

// ── 1. Moving averages ───────────────────────────────────────────────

proptest! {
    #[test]
    fn sma_defined_exactly_once_window_fills(
        closes in arb_closes(260),
        window in prop::sample::select(vec![SHORT_WINDOW, LONG_WINDOW, 1, 3]),
    ) {
        let sma = simple_moving_average(&closes, window);
        prop_assert_eq!(sma.len(), closes.len());

        for (index, value) in sma.iter().copied().enumerate() {
            if index + 1 < window {
                prop_assert!(value.is_none(), "index {} defined for window {}", index, window);
                continue;
            }
            let slice = &closes[index + 1 - window..=index];
            let mean = slice.iter().sum::<f64>() / window as f64;
            let actual = value.expect("window is full");
            prop_assert!((actual - mean).abs() < 1e-6, "index {}: {} vs {}", index, actual, mean);
        }
    }
}

// ── 2. History ordering ──────────────────────────────────────────────

proptest! {
    #[test]
    fn history_is_ascending_for_any_arrival_order(
        days in prop::collection::vec(0_i64..2000, 1..120).prop_shuffle(),
    ) {
        let bars = days.iter().map(|day| bar(*day, 100.0)).collect::<Vec<_>>();
        let series = HistorySeries::from_bars(bars).expect("timestamps in range");

        prop_assert_eq!(series.len(), days.len());
        for pair in series.points().windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn history_moving_averages_follow_trading_days(closes in arb_closes(240)) {
        prop_assume!(!closes.is_empty());
        let bars = closes
            .iter()
            .enumerate()
            .map(|(day, close)| bar(day as i64, *close))
            .collect::<Vec<_>>();
        let series = HistorySeries::from_bars(bars).expect("timestamps in range");

        for (index, point) in series.points().iter().enumerate() {
            prop_assert_eq!(point.sma_50.is_some(), index >= SHORT_WINDOW - 1);
            prop_assert_eq!(point.sma_200.is_some(), index >= LONG_WINDOW - 1);
        }
    }
}

// ── 3. Flattening ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn flatten_names_every_leaf_once(statement in arb_statement()) {
        let value = json!(statement);
        let fields = flatten(&value);

        let expected = statement
            .values()
            .map(|section| section.len().max(1))
            .sum::<usize>();
        if statement.is_empty() {
            prop_assert_eq!(fields.len(), 1);
        } else {
            prop_assert_eq!(fields.len(), expected);
        }

        let paths = fields.iter().map(|f| f.path.as_str()).collect::<HashSet<_>>();
        prop_assert_eq!(paths.len(), fields.len());

        for field in &fields {
            let mut parts = field.path.split(PATH_SEPARATOR);
            let section = parts.next().unwrap_or_default();
            match parts.next() {
                Some(key) => {
                    prop_assert_eq!(&field.value, &Value::from(statement[section][key]));
                }
                None if !statement.is_empty() => {
                    prop_assert!(statement[section].is_empty());
                }
                None => {}
            }
        }
    }
}
