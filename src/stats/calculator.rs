//! Statistics Calculator Module
//! Frequency counting, modes and duration aggregates shared by the reports.

use chrono::TimeDelta;
use indexmap::IndexMap;
use statrs::statistics::Statistics;
use std::hash::Hash;

/// Frequency and aggregate helpers.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Count each distinct value, most frequent first.
    ///
    /// Values with equal counts keep the order in which they were first seen.
    pub fn value_counts<I, T>(values: I) -> Vec<(T, usize)>
    where
        I: IntoIterator<Item = T>,
        T: Hash + Eq,
    {
        let mut counts: IndexMap<T, usize> = IndexMap::new();
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut pairs: Vec<(T, usize)> = counts.into_iter().collect();
        // Stable sort keeps first-seen order among ties.
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }

    /// Most frequent value, ties broken by first occurrence. `None` when empty.
    pub fn mode<I, T>(values: I) -> Option<T>
    where
        I: IntoIterator<Item = T>,
        T: Hash + Eq,
    {
        Self::value_counts(values)
            .into_iter()
            .next()
            .map(|(value, _)| value)
    }

    /// Arithmetic mean, `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().mean())
    }

    /// Smallest and largest value, `None` for an empty slice.
    pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
        if values.is_empty() {
            return None;
        }
        Some((Statistics::min(values.iter()), Statistics::max(values.iter())))
    }

    /// Convert a (possibly fractional) number of seconds into a duration.
    pub fn seconds_to_duration(seconds: f64) -> TimeDelta {
        TimeDelta::microseconds((seconds * 1_000_000.0).round() as i64)
    }

    /// Render a duration as `D days HH:MM:SS[.ffffff]`.
    pub fn format_duration(duration: TimeDelta) -> String {
        let sign = if duration < TimeDelta::zero() { "-" } else { "" };
        let duration = duration.abs();

        let total_seconds = duration.num_seconds();
        let days = total_seconds / 86_400;
        let hours = (total_seconds % 86_400) / 3_600;
        let minutes = (total_seconds % 3_600) / 60;
        let seconds = total_seconds % 60;
        let micros = duration.subsec_nanos() / 1_000;

        if micros > 0 {
            format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
        } else {
            format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_descending() {
        let counts = StatsCalculator::value_counts(["b", "a", "b", "c", "b", "a"]);
        assert_eq!(counts, vec![("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn test_mode_breaks_ties_by_first_occurrence() {
        assert_eq!(StatsCalculator::mode(["x", "y", "y", "x"]), Some("x"));
        assert_eq!(StatsCalculator::mode([3, 1, 1, 3, 2]), Some(3));
        assert_eq!(StatsCalculator::mode(Vec::<i32>::new()), None);
    }

    #[test]
    fn test_mean_and_min_max() {
        assert_eq!(StatsCalculator::mean(&[100.0, 300.0]), Some(200.0));
        assert_eq!(StatsCalculator::mean(&[]), None);
        assert_eq!(
            StatsCalculator::min_max(&[1980.0, 1955.0, 2001.0]),
            Some((1955.0, 2001.0))
        );
        assert_eq!(StatsCalculator::min_max(&[]), None);
    }

    #[test]
    fn test_format_duration() {
        let d = StatsCalculator::seconds_to_duration(400.0);
        assert_eq!(StatsCalculator::format_duration(d), "0 days 00:06:40");

        let d = StatsCalculator::seconds_to_duration(90_061.5);
        assert_eq!(StatsCalculator::format_duration(d), "1 days 01:01:01.500000");

        let d = StatsCalculator::seconds_to_duration(-30.0);
        assert_eq!(StatsCalculator::format_duration(d), "-0 days 00:00:30");
    }
}
