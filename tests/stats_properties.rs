//! Property-based invariants of the statistics engine and the store's
//! window clamping.

use proptest::prelude::*;
use trendview_core::stats;
use trendview_core::{DataPoint, DataSource, MeasurementStore, RawMeasurement};

/// Batches of 7..60 records with ids 1..n and bounded readings.
fn measurement_sets() -> impl Strategy<Value = Vec<RawMeasurement>> {
    prop::collection::vec(
        (-1.0e3f64..1.0e3, -1.0e3f64..1.0e3, -1.0e3f64..1.0e3),
        7..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (x, y, z))| RawMeasurement {
                id: i as i64 + 1,
                x,
                y,
                z,
            })
            .collect()
    })
}

struct VecSource(Vec<RawMeasurement>);

impl DataSource for VecSource {
    fn fetch(&self, _source_id: &str) -> Option<Vec<RawMeasurement>> {
        Some(self.0.clone())
    }
}

proptest! {
    #[test]
    fn fences_bracket_the_median(values in prop::collection::vec(-1.0e6f64..1.0e6, 7..200)) {
        let quartiles = stats::median_and_fences(&values).unwrap();
        prop_assert!(quartiles.lower_fence <= quartiles.median);
        prop_assert!(quartiles.median <= quartiles.upper_fence);
    }

    #[test]
    fn outliers_partition_the_series(values in prop::collection::vec(-1.0e3f64..1.0e3, 7..100)) {
        let series: Vec<DataPoint> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| DataPoint::new(i as i64 + 1, v))
            .collect();
        let quartiles = stats::median_and_fences(&values).unwrap();
        let flagged = stats::outliers(&series, quartiles.upper_fence, quartiles.lower_fence);

        let flagged_ids: Vec<i64> = flagged.iter().map(|p| p.id).collect();
        for point in &series {
            let outside =
                point.value < quartiles.lower_fence || point.value > quartiles.upper_fence;
            prop_assert_eq!(outside, flagged_ids.contains(&point.id));
        }

        // Flagged points keep their series order.
        let mut sorted_ids = flagged_ids.clone();
        sorted_ids.sort_unstable();
        prop_assert_eq!(flagged_ids, sorted_ids);
    }

    #[test]
    fn value_order_does_not_change_fences(values in prop::collection::vec(-1.0e6f64..1.0e6, 7..100)) {
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(
            stats::median_and_fences(&values),
            stats::median_and_fences(&reversed)
        );
    }

    #[test]
    fn slope_recovers_a_linear_relation(
        intercept in -100.0f64..100.0,
        gradient in -50.0f64..50.0,
        len in 7usize..60,
    ) {
        let series: Vec<DataPoint> = (1..=len as i64)
            .map(|id| DataPoint::new(id, intercept + gradient * id as f64))
            .collect();
        let fitted = stats::slope(&series).unwrap();
        prop_assert!((fitted - gradient).abs() < 1e-6);
    }

    #[test]
    fn window_clamps_into_the_valid_range(raw in measurement_sets(), requested in 0usize..100) {
        let available = raw.len();
        let mut store = MeasurementStore::new(VecSource(raw));
        store.load_from_source("generated").unwrap();
        store.recalculate_statistics(requested);

        let window = store.window_size();
        prop_assert!(window >= stats::MIN_SAMPLE);
        prop_assert!(window <= available);
        for result in store.axis_results() {
            prop_assert_eq!(result.series.len(), window);
        }
    }

    #[test]
    fn recomputation_is_bit_stable(raw in measurement_sets(), requested in 0usize..100) {
        let mut store = MeasurementStore::new(VecSource(raw));
        store.load_from_source("generated").unwrap();
        store.recalculate_statistics(requested);
        let first = store.axis_results().to_vec();
        store.recalculate_statistics(requested);
        prop_assert_eq!(first.as_slice(), store.axis_results());
    }
}
