//! Sliding-window cost aggregation per tag
//!
//! Produces a time series of per-tag cost sums across a range of day
//! offsets. Each offset step slides a fixed-width day window one day
//! further into the past, so consecutive points overlap and an entry can
//! contribute to many points.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Entry, Money};
use crate::query::tags::TagFilter;

/// Label of the synthetic bucket used when no include tags are configured
pub const ALL_BUCKET: &str = "all";

/// An ordered sequence of per-bucket cost sums, one row per day offset
///
/// `points[offset][i]` is the accumulated cost of bucket `labels[i]` for
/// that offset's window. Rows are ordered by ascending offset.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    labels: Vec<String>,
    points: Vec<Vec<Money>>,
}

impl TimeSeries {
    /// The bucket labels, in the order the include tags were supplied
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of day offsets evaluated
    pub fn num_offsets(&self) -> usize {
        self.points.len()
    }

    /// The accumulated cost of one bucket at one offset
    pub fn get(&self, offset: usize, label: &str) -> Option<Money> {
        let col = self.labels.iter().position(|l| l == label)?;
        self.points.get(offset).map(|row| row[col])
    }

    /// One bucket's values across all offsets
    pub fn column(&self, label: &str) -> Option<Vec<Money>> {
        let col = self.labels.iter().position(|l| l == label)?;
        Some(self.points.iter().map(|row| row[col]).collect())
    }

    /// Per-offset sums across all buckets
    ///
    /// With explicit include tags an entry matching several buckets is
    /// counted once per bucket, so this combined series can exceed the sum
    /// of distinct entry costs.
    pub fn combined(&self) -> Vec<Money> {
        self.points
            .iter()
            .map(|row| row.iter().copied().sum())
            .collect()
    }
}

/// Sum costs per bucket over a sliding day window
///
/// For each offset `k` in `0..num_offsets` the selection window is
/// `k <= (reference - entry.date).days <= window_days + k`, i.e. a window of
/// `window_days + 1` days sliding one day per step.
///
/// When the filter has no include tags every surviving entry is summed once
/// into the synthetic [`ALL_BUCKET`]; otherwise the include tags are the
/// buckets and an entry is added to every bucket whose label it carries.
/// The filter's exclude set applies in both modes. An empty entry slice
/// yields all-zero rows, not an error.
pub fn aggregate(
    entries: &[Entry],
    filter: &TagFilter,
    reference: NaiveDate,
    window_days: i64,
    num_offsets: usize,
) -> ExpenseResult<TimeSeries> {
    if num_offsets == 0 {
        return Err(ExpenseError::invalid_window(
            "number of offsets must be at least 1".to_string(),
        ));
    }

    let labels: Vec<String> = if filter.has_includes() {
        filter.include().to_vec()
    } else {
        vec![ALL_BUCKET.to_string()]
    };

    let mut points = Vec::with_capacity(num_offsets);

    for offset in 0..num_offsets as i64 {
        let mut row = vec![Money::zero(); labels.len()];

        for entry in entries {
            if filter.excludes(entry) {
                continue;
            }
            let days = (reference - entry.date).num_days();
            if days < offset || days > window_days + offset {
                continue;
            }

            if filter.has_includes() {
                for (col, label) in labels.iter().enumerate() {
                    if entry.has_label(label) {
                        row[col] += entry.cost;
                    }
                }
            } else {
                // Synthetic bucket: every surviving entry exactly once.
                row[0] += entry.cost;
            }
        }

        points.push(row);
    }

    Ok(TimeSeries { labels, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: u64, name: &str, cents: i64, date: NaiveDate, tags: &[&str]) -> Entry {
        Entry::new(
            EntryId::from_raw(id),
            name,
            Money::from_cents(cents),
            date,
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn reference() -> NaiveDate {
        date(2025, 3, 31)
    }

    #[test]
    fn test_zero_offsets_rejected() {
        let result = aggregate(&[], &TagFilter::all(), reference(), 30, 0);
        assert!(matches!(result, Err(ExpenseError::InvalidWindow(_))));
    }

    #[test]
    fn test_empty_entries_give_zero_series() {
        let series = aggregate(&[], &TagFilter::all(), reference(), 30, 3).unwrap();
        assert_eq!(series.num_offsets(), 3);
        assert_eq!(series.labels(), [ALL_BUCKET]);
        for offset in 0..3 {
            assert_eq!(series.get(offset, ALL_BUCKET), Some(Money::zero()));
        }
    }

    #[test]
    fn test_all_bucket_counts_each_entry_once() {
        let today = reference();
        let entries = vec![
            entry(1, "Coffee", 350, today - chrono::Duration::days(1), &[]),
            entry(
                2,
                "Rent",
                80000,
                today - chrono::Duration::days(5),
                &["housing", "fixed"],
            ),
        ];

        let series = aggregate(&entries, &TagFilter::all(), today, 30, 1).unwrap();
        // Rent matches two of its own tags but is still counted once.
        assert_eq!(series.get(0, ALL_BUCKET), Some(Money::from_cents(80350)));
    }

    #[test]
    fn test_conservation_against_direct_sum() {
        let today = reference();
        let entries: Vec<Entry> = (0..20)
            .map(|i| {
                entry(
                    i,
                    "Item",
                    (i as i64 + 1) * 100,
                    today - chrono::Duration::days(i as i64 * 3),
                    &["misc"],
                )
            })
            .collect();

        let series = aggregate(&entries, &TagFilter::all(), today, 14, 5).unwrap();

        for offset in 0..5i64 {
            let direct: Money = entries
                .iter()
                .filter(|e| {
                    let days = (today - e.date).num_days();
                    days >= offset && days <= 14 + offset
                })
                .map(|e| e.cost)
                .sum();
            assert_eq!(series.get(offset as usize, ALL_BUCKET), Some(direct));
        }
    }

    #[test]
    fn test_explicit_buckets_multi_count() {
        let today = reference();
        let entries = vec![entry(
            1,
            "Dinner",
            2000,
            today - chrono::Duration::days(2),
            &["food", "social"],
        )];
        let filter = TagFilter::parse(["food", "social"]).unwrap();

        let series = aggregate(&entries, &filter, today, 30, 1).unwrap();
        assert_eq!(series.get(0, "food"), Some(Money::from_cents(2000)));
        assert_eq!(series.get(0, "social"), Some(Money::from_cents(2000)));
        // Combined exceeds the distinct-entry total by design.
        assert_eq!(series.combined(), vec![Money::from_cents(4000)]);
    }

    #[test]
    fn test_exclude_applies_in_aggregation() {
        let today = reference();
        let entries = vec![
            entry(1, "Groceries", 5000, today, &["food"]),
            entry(2, "Dinner", 3000, today, &["food", "restaurant"]),
        ];
        let filter = TagFilter::parse(["food", "/restaurant"]).unwrap();

        let series = aggregate(&entries, &filter, today, 30, 1).unwrap();
        assert_eq!(series.get(0, "food"), Some(Money::from_cents(5000)));
    }

    #[test]
    fn test_sliding_window_continuity() {
        let today = reference();
        // Entry at offset 5 sits inside every window [k, 30+k] for k <= 5.
        let entries = vec![entry(
            1,
            "Rent",
            80000,
            today - chrono::Duration::days(5),
            &["housing"],
        )];
        let filter = TagFilter::parse(["housing"]).unwrap();

        let series = aggregate(&entries, &filter, today, 30, 8).unwrap();
        for offset in 0..=5 {
            assert_eq!(
                series.get(offset, "housing"),
                Some(Money::from_cents(80000)),
                "offset {}",
                offset
            );
        }
        for offset in 6..8 {
            assert_eq!(series.get(offset, "housing"), Some(Money::zero()));
        }
    }

    #[test]
    fn test_window_excludes_entries_newer_than_offset() {
        let today = reference();
        // Offset 2's window is [2, 32]: an entry from yesterday is too new.
        let entries = vec![entry(1, "Coffee", 350, today - chrono::Duration::days(1), &[])];

        let series = aggregate(&entries, &TagFilter::all(), today, 30, 3).unwrap();
        assert_eq!(series.get(0, ALL_BUCKET), Some(Money::from_cents(350)));
        assert_eq!(series.get(1, ALL_BUCKET), Some(Money::from_cents(350)));
        assert_eq!(series.get(2, ALL_BUCKET), Some(Money::zero()));
    }

    #[test]
    fn test_column_extraction() {
        let today = reference();
        let entries = vec![entry(1, "Rent", 80000, today, &["housing"])];
        let filter = TagFilter::parse(["housing", "food"]).unwrap();

        let series = aggregate(&entries, &filter, today, 30, 2).unwrap();
        assert_eq!(
            series.column("housing"),
            Some(vec![Money::from_cents(80000), Money::zero()])
        );
        assert_eq!(
            series.column("food"),
            Some(vec![Money::zero(), Money::zero()])
        );
        assert_eq!(series.column("travel"), None);
    }
}
