use std::collections::HashMap;

/// Mean of the non-null hourly samples for each target day.
///
/// Timestamps carry the civil local date of the forecast location in their
/// first ten characters; that prefix is compared verbatim against the daily
/// `time` array from the same response, so no timezone conversion happens
/// here. Days without a single usable sample yield `None`. No interpolation,
/// no carry-forward from neighboring days.
pub fn daily_mean(
    times: &[String],
    values: &[Option<f64>],
    days: &[String],
) -> Vec<Option<f64>> {
    let mut buckets: HashMap<&str, (f64, u32)> = HashMap::new();

    for (time, value) in times.iter().zip(values.iter()) {
        let day = match time.get(..10) {
            Some(d) => d,
            None => continue,
        };
        if let Some(v) = value {
            let e = buckets.entry(day).or_insert((0.0, 0));
            e.0 += v;
            e.1 += 1;
        }
    }

    days.iter()
        .map(|day| {
            buckets
                .get(day.as_str())
                .map(|(sum, count)| sum / f64::from(*count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hours(day: &str, values: &[Option<f64>]) -> (Vec<String>, Vec<Option<f64>>) {
        let times = (0..values.len())
            .map(|h| format!("{}T{:02}:00", day, h))
            .collect();
        (times, values.to_vec())
    }

    #[test]
    fn means_per_day() {
        let (times, values) = hours("2026-08-06", &[Some(40.0), Some(60.0)]);
        let days = vec!["2026-08-06".to_string()];
        assert_eq!(daily_mean(&times, &values, &days), vec![Some(50.0)]);
    }

    #[test]
    fn null_samples_are_skipped_not_zeroed() {
        let (times, values) = hours("2026-08-06", &[Some(30.0), None, Some(60.0)]);
        let days = vec!["2026-08-06".to_string()];
        assert_eq!(daily_mean(&times, &values, &days), vec![Some(45.0)]);
    }

    #[test]
    fn day_without_samples_is_none() {
        let (times, values) = hours("2026-08-06", &[Some(50.0)]);
        let days = vec!["2026-08-06".to_string(), "2026-08-07".to_string()];
        assert_eq!(daily_mean(&times, &values, &days), vec![Some(50.0), None]);
    }

    #[test]
    fn day_with_only_nulls_is_none() {
        let (times, values) = hours("2026-08-06", &[None, None]);
        let days = vec!["2026-08-06".to_string()];
        assert_eq!(daily_mean(&times, &values, &days), vec![None]);
    }

    #[test]
    fn output_order_follows_day_list() {
        let mut times = Vec::new();
        let mut values = Vec::new();
        for (day, v) in [("2026-08-06", 10.0), ("2026-08-07", 20.0)] {
            let (t, vs) = hours(day, &[Some(v)]);
            times.extend(t);
            values.extend(vs);
        }
        let days = vec!["2026-08-07".to_string(), "2026-08-06".to_string()];
        assert_eq!(daily_mean(&times, &values, &days), vec![Some(20.0), Some(10.0)]);
    }

    proptest! {
        #[test]
        fn length_matches_day_list(days in prop::collection::vec("[0-9]{4}-[0-9]{2}-[0-9]{2}", 0..10)) {
            let out = daily_mean(&[], &[], &days);
            prop_assert_eq!(out.len(), days.len());
            prop_assert!(out.iter().all(Option::is_none));
        }

        #[test]
        fn mean_is_bounded_by_its_samples(samples in prop::collection::vec(0.0f64..100.0, 1..24)) {
            let values: Vec<Option<f64>> = samples.iter().copied().map(Some).collect();
            let times: Vec<String> = (0..values.len())
                .map(|h| format!("2026-08-06T{:02}:00", h))
                .collect();
            let days = vec!["2026-08-06".to_string()];

            let out = daily_mean(&times, &values, &days);
            let mean = out[0].unwrap();
            let lo = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(mean >= lo - 1e-9);
            prop_assert!(mean <= hi + 1e-9);

            let expected = samples.iter().sum::<f64>() / samples.len() as f64;
            prop_assert!((mean - expected).abs() < 1e-9);
        }
    }
}
