// Comparison summaries for collected results

use crate::benchmarks::ResultCollection;
use crate::conditions::Condition;
use std::time::Duration;

/// Fastest and slowest candidate for one condition
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSummary {
    pub condition: Condition,
    pub fastest: String,
    pub fastest_time: Duration,
    pub slowest: String,
    pub slowest_time: Duration,
}

impl ConditionSummary {
    /// How many times faster the fastest candidate was than the slowest
    pub fn speedup(&self) -> f64 {
        compare_speedup(self.slowest_time, self.fastest_time)
    }
}

pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2} µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", nanos as f64 / 1_000_000_000.0)
    }
}

/// Speedup of `optimized` over `baseline`; 0.0 when `optimized` took no time
pub fn compare_speedup(baseline: Duration, optimized: Duration) -> f64 {
    if optimized.as_nanos() == 0 {
        return 0.0;
    }
    baseline.as_nanos() as f64 / optimized.as_nanos() as f64
}

/// For every condition of the first candidate, find the fastest and slowest
/// candidate that recorded the same condition.
pub fn fastest_per_condition(results: &ResultCollection) -> Vec<ConditionSummary> {
    let Some((_, first_rows)) = results.first() else {
        return Vec::new();
    };

    let mut summaries = Vec::with_capacity(first_rows.len());
    for reference in first_rows {
        let timings = results.iter().filter_map(|(label, rows)| {
            rows.iter()
                .find(|row| row.condition == reference.condition)
                .map(|row| (label, row.elapsed))
        });

        let mut best: Option<(&String, Duration)> = None;
        let mut worst: Option<(&String, Duration)> = None;
        for (label, elapsed) in timings {
            if best.map_or(true, |(_, t)| elapsed < t) {
                best = Some((label, elapsed));
            }
            if worst.map_or(true, |(_, t)| elapsed > t) {
                worst = Some((label, elapsed));
            }
        }

        if let (Some((fastest, fastest_time)), Some((slowest, slowest_time))) = (best, worst) {
            summaries.push(ConditionSummary {
                condition: reference.condition.clone(),
                fastest: fastest.clone(),
                fastest_time,
                slowest: slowest.clone(),
                slowest_time,
            });
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::ResultRow;

    fn row(n: i64, millis: u64) -> ResultRow {
        ResultRow::new(Condition::new(vec![n]), Duration::from_millis(millis))
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500 ns");
        assert_eq!(format_duration(Duration::from_micros(500)), "500.00 µs");
        assert_eq!(format_duration(Duration::from_millis(500)), "500.00 ms");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.00 s");
    }

    #[test]
    fn test_compare_speedup() {
        let speedup = compare_speedup(Duration::from_millis(100), Duration::from_millis(10));
        assert!((speedup - 10.0).abs() < 0.01);
        assert_eq!(compare_speedup(Duration::from_millis(1), Duration::ZERO), 0.0);
    }

    #[test]
    fn test_fastest_per_condition() {
        let mut results = ResultCollection::new();
        results.insert("slow".to_string(), vec![row(1, 40), row(2, 80)]);
        results.insert("fast".to_string(), vec![row(1, 10), row(2, 90)]);

        let summaries = fastest_per_condition(&results);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].fastest, "fast");
        assert_eq!(summaries[0].slowest, "slow");
        assert!((summaries[0].speedup() - 4.0).abs() < 0.01);
        assert_eq!(summaries[1].fastest, "slow");
        assert_eq!(summaries[1].slowest, "fast");
    }

    #[test]
    fn test_fastest_per_condition_empty() {
        assert!(fastest_per_condition(&ResultCollection::new()).is_empty());
    }
}
