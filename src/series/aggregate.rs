//! Daily aggregation of sub-daily price samples.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DailySeries, Sample};
use crate::error::PipelineError;

/// Reduce samples to one arithmetic mean per calendar date.
///
/// The date is the sample's naive timestamp truncated to the day. An empty input
/// yields an empty series.
pub fn aggregate(samples: &[Sample]) -> Result<DailySeries, PipelineError> {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

    for s in samples {
        if !(s.value.is_finite() && s.value > 0.0) {
            return Err(PipelineError::invalid_input(format!(
                "price sample at {} has invalid value {}",
                s.timestamp, s.value
            )));
        }
        let entry = buckets.entry(s.timestamp.date()).or_insert((0.0, 0));
        entry.0 += s.value;
        entry.1 += 1;
    }

    DailySeries::from_entries(
        buckets
            .into_iter()
            .map(|(date, (sum, n))| (date, sum / n as f64)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn averages_samples_per_day() {
        let samples = vec![
            Sample::new(at(2024, 1, 1, 0), 100.0),
            Sample::new(at(2024, 1, 1, 13), 110.0),
            Sample::new(at(2024, 1, 2, 9), 200.0),
        ];
        let daily = aggregate(&samples).unwrap();

        assert_eq!(daily.len(), 2);
        let day1 = daily.get(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
        let day2 = daily.get(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).unwrap();
        assert!((day1 - 105.0).abs() < 1e-12, "day1: {day1}");
        assert!((day2 - 200.0).abs() < 1e-12, "day2: {day2}");
    }

    #[test]
    fn single_sample_passes_through_unchanged() {
        let samples = vec![Sample::new(at(2024, 5, 5, 23), 61_234.56)];
        let daily = aggregate(&samples).unwrap();
        assert_eq!(daily.get(NaiveDate::from_ymd_opt(2024, 5, 5).unwrap()), Some(61_234.56));
    }

    #[test]
    fn midnight_boundary_splits_days() {
        let late = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let samples = vec![Sample::new(late, 10.0), Sample::new(at(2024, 1, 2, 0), 20.0)];
        let daily = aggregate(&samples).unwrap();
        assert_eq!(daily.len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(aggregate(&[]).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_positive_prices() {
        let samples = vec![Sample::new(at(2024, 1, 1, 0), 0.0)];
        assert!(matches!(aggregate(&samples), Err(PipelineError::InvalidInput(_))));

        let samples = vec![Sample::new(at(2024, 1, 1, 0), f64::NAN)];
        assert!(matches!(aggregate(&samples), Err(PipelineError::InvalidInput(_))));
    }
}
