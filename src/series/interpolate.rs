//! Daily densification of a sparse macro series.
//!
//! Values between two consecutive observations are linearly interpolated using
//! exact day counts. Nothing is extrapolated: days before the first or after the
//! last observation are left out of the result.
//!
//! Observations outside `[range_start, range_end]` still act as bracketing
//! endpoints for days inside the range.

use chrono::NaiveDate;

use crate::domain::{DenseSeries, Observation, Provenance};
use crate::error::PipelineError;

/// Expand `observations` to one value per day in `[range_start, range_end]`.
///
/// `observations` must be strictly ascending by date.
pub fn densify(
    observations: &[Observation],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<DenseSeries, PipelineError> {
    if range_start > range_end {
        return Err(PipelineError::invalid_input(format!(
            "densify range is inverted: {range_start} > {range_end}"
        )));
    }
    validate(observations)?;

    let mut out = DenseSeries::default();
    let in_range = |d: NaiveDate| d >= range_start && d <= range_end;

    for obs in observations {
        if in_range(obs.date) {
            out.values.insert(obs.date, obs.value)?;
            out.tags.insert(obs.date, Provenance::Observed);
        }
    }

    for pair in observations.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let span = (hi.date - lo.date).num_days() as f64;

        let first = lo.date.succ_opt().map_or(range_start, |d| d.max(range_start));
        let last = hi.date.pred_opt().map_or(range_end, |d| d.min(range_end));
        if first > last {
            continue;
        }

        for day in first.iter_days().take_while(|d| *d <= last) {
            let elapsed = (day - lo.date).num_days() as f64;
            let value = lo.value + (hi.value - lo.value) * elapsed / span;
            out.values.insert(day, value)?;
            out.tags.insert(day, Provenance::Interpolated);
        }
    }

    Ok(out)
}

fn validate(observations: &[Observation]) -> Result<(), PipelineError> {
    for obs in observations {
        if !obs.value.is_finite() {
            return Err(PipelineError::invalid_input(format!(
                "macro observation at {} has non-finite value",
                obs.date
            )));
        }
    }
    for pair in observations.windows(2) {
        if pair[1].date == pair[0].date {
            return Err(PipelineError::invalid_input(format!(
                "duplicate macro observation date {}",
                pair[0].date
            )));
        }
        if pair[1].date < pair[0].date {
            return Err(PipelineError::invalid_input(format!(
                "macro observations out of order: {} after {}",
                pair[1].date, pair[0].date
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn interpolates_by_exact_day_count() {
        let obs = vec![Observation::new(d(2024, 1, 1), 100.0), Observation::new(d(2024, 2, 1), 200.0)];
        let dense = densify(&obs, d(2024, 1, 1), d(2024, 2, 1)).unwrap();

        assert_eq!(dense.values.len(), 32);
        assert_eq!(dense.tags.len(), 32);

        let mid = dense.values.get(d(2024, 1, 16)).unwrap();
        let expected = 100.0 + (200.0 - 100.0) * 15.0 / 31.0;
        assert!((mid - expected).abs() < 1e-9, "expected {expected}, got {mid}");
        assert_eq!(dense.tags[&d(2024, 1, 16)], Provenance::Interpolated);

        assert_eq!(dense.values.get(d(2024, 1, 1)), Some(100.0));
        assert_eq!(dense.values.get(d(2024, 2, 1)), Some(200.0));
        assert_eq!(dense.tags[&d(2024, 1, 1)], Provenance::Observed);
        assert_eq!(dense.tags[&d(2024, 2, 1)], Provenance::Observed);
    }

    #[test]
    fn never_extrapolates_or_leaves_range() {
        let obs = vec![Observation::new(d(2024, 3, 1), 10.0), Observation::new(d(2024, 4, 1), 20.0)];
        let dense = densify(&obs, d(2024, 2, 20), d(2024, 4, 10)).unwrap();

        assert_eq!(dense.values.first_date(), Some(d(2024, 3, 1)));
        assert_eq!(dense.values.last_date(), Some(d(2024, 4, 1)));

        let narrow = densify(&obs, d(2024, 3, 10), d(2024, 3, 12)).unwrap();
        let dates: Vec<_> = narrow.values.dates().collect();
        assert_eq!(dates, vec![d(2024, 3, 10), d(2024, 3, 11), d(2024, 3, 12)]);
        assert!(narrow.tags.values().all(|t| *t == Provenance::Interpolated));
    }

    #[test]
    fn brackets_with_observations_outside_range() {
        let obs = vec![
            Observation::new(d(2024, 1, 1), 0.0),
            Observation::new(d(2024, 1, 11), 10.0),
            Observation::new(d(2024, 1, 21), 30.0),
        ];
        let dense = densify(&obs, d(2024, 1, 15), d(2024, 1, 15)).unwrap();
        assert_eq!(dense.values.len(), 1);
        let v = dense.values.get(d(2024, 1, 15)).unwrap();
        assert!((v - 18.0).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn zero_or_one_observation_never_interpolates() {
        let empty = densify(&[], d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert!(empty.values.is_empty());
        assert!(empty.tags.is_empty());

        let single = vec![Observation::new(d(2024, 1, 10), 5.0)];
        let dense = densify(&single, d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert_eq!(dense.values.len(), 1);
        assert_eq!(dense.values.get(d(2024, 1, 10)), Some(5.0));
        assert_eq!(dense.tags[&d(2024, 1, 10)], Provenance::Observed);

        let outside = densify(&single, d(2024, 2, 1), d(2024, 2, 5)).unwrap();
        assert!(outside.values.is_empty());
    }

    #[test]
    fn adjacent_observations_have_nothing_between() {
        let obs = vec![Observation::new(d(2024, 1, 1), 1.0), Observation::new(d(2024, 1, 2), 2.0)];
        let dense = densify(&obs, d(2024, 1, 1), d(2024, 1, 2)).unwrap();
        assert_eq!(dense.values.len(), 2);
        assert!(dense.tags.values().all(|t| *t == Provenance::Observed));
    }

    #[test]
    fn rejects_duplicate_and_unsorted_dates() {
        let dup = vec![Observation::new(d(2024, 1, 1), 1.0), Observation::new(d(2024, 1, 1), 2.0)];
        assert!(matches!(
            densify(&dup, d(2024, 1, 1), d(2024, 1, 2)),
            Err(PipelineError::InvalidInput(_))
        ));

        let unsorted = vec![Observation::new(d(2024, 2, 1), 1.0), Observation::new(d(2024, 1, 1), 2.0)];
        assert!(matches!(
            densify(&unsorted, d(2024, 1, 1), d(2024, 2, 1)),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_inverted_range() {
        let obs = vec![Observation::new(d(2024, 1, 1), 1.0)];
        assert!(densify(&obs, d(2024, 1, 5), d(2024, 1, 1)).is_err());
    }
}
