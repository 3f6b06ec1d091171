//! Query orchestration
//!
//! Pure functions over an entries snapshot: the flat listing view, the
//! sliding-window average view with trend fitting, and the single-window
//! tag comparison view. Nothing here mutates the store or formats output;
//! callers render the returned structures themselves.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Entry, Money};
use crate::query::aggregate::{self, ALL_BUCKET};
use crate::query::tags::TagFilter;
use crate::query::trend;
use crate::query::window::Window;

/// Sort key for the listing view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Sort by entry name
    Name,
    /// Sort by cost
    Cost,
    /// Sort by date
    #[default]
    Date,
}

impl FromStr for SortKey {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "cost" => Ok(Self::Cost),
            "date" => Ok(Self::Date),
            other => Err(ExpenseError::UnknownSortKey(other.to_string())),
        }
    }
}

/// A filtered, sorted slice of the store with its cost total
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Matching entries, sorted ascending by the requested key
    pub entries: Vec<Entry>,
    /// Sum of costs over the matching entries
    pub total: Money,
}

/// One trend series of the average view
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    /// Bucket label (an include tag, or "all" for combined/unfiltered data)
    pub label: String,
    /// Raw sliding-window sums, one per day offset
    pub raw: Vec<Money>,
    /// Fitted polynomial evaluated at each offset
    pub fit: Vec<f64>,
}

/// Filter entries by window and tags, sort them, and total their costs
///
/// The sort is stable and ascending, so entries that compare equal keep
/// their original snapshot order.
pub fn list_view(
    entries: &[Entry],
    window: &Window,
    filter: &TagFilter,
    sort: SortKey,
) -> Listing {
    let mut selected: Vec<Entry> = entries
        .iter()
        .filter(|e| window.contains(e) && filter.matches(e))
        .cloned()
        .collect();

    match sort {
        SortKey::Name => selected.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Cost => selected.sort_by(|a, b| a.cost.cmp(&b.cost)),
        SortKey::Date => selected.sort_by(|a, b| a.date.cmp(&b.date)),
    }

    let total = selected.iter().map(|e| e.cost).sum();
    Listing {
        entries: selected,
        total,
    }
}

/// Compute per-tag sliding-window sums and fit a trend to each
///
/// `total_days` defaults to the span from the oldest entry's date to the
/// reference day. The number of offsets is `total_days - window_days` and
/// must be at least 1. With `combine`, the per-bucket values are summed
/// into a single series fitted once; otherwise every bucket gets its own
/// fit.
pub fn average_view(
    entries: &[Entry],
    filter: &TagFilter,
    reference: NaiveDate,
    total_days: Option<i64>,
    window_days: i64,
    degree: usize,
    combine: bool,
) -> ExpenseResult<Vec<TrendSeries>> {
    let total_days = total_days.unwrap_or_else(|| {
        entries
            .iter()
            .map(|e| (reference - e.date).num_days())
            .max()
            .unwrap_or(0)
    });

    let num_offsets = total_days - window_days;
    if num_offsets < 1 {
        return Err(ExpenseError::invalid_window(format!(
            "total days {} must exceed the window size {}",
            total_days, window_days
        )));
    }

    let series = aggregate::aggregate(entries, filter, reference, window_days, num_offsets as usize)?;

    let buckets: Vec<(String, Vec<Money>)> = if combine {
        vec![(ALL_BUCKET.to_string(), series.combined())]
    } else {
        series
            .labels()
            .iter()
            .map(|label| {
                let raw = series.column(label).unwrap_or_default();
                (label.clone(), raw)
            })
            .collect()
    };

    buckets
        .into_iter()
        .map(|(label, raw)| {
            let ys: Vec<f64> = raw.iter().map(|m| m.to_unit_f64()).collect();
            let fitted = trend::fit(&ys, degree)?;
            Ok(TrendSeries {
                label,
                raw,
                fit: fitted.values,
            })
        })
        .collect()
}

/// Total cost per include tag over one fixed window
///
/// Unlike [`average_view`] the window does not slide: each tag gets a
/// single cumulative sum over `[0, total_days]`. Totals come back in the
/// order the tags were supplied; a tag with no matching entries reports
/// zero.
pub fn compare_view(
    entries: &[Entry],
    filter: &TagFilter,
    reference: NaiveDate,
    total_days: i64,
) -> ExpenseResult<Vec<(String, Money)>> {
    if !filter.has_includes() {
        return Err(ExpenseError::EmptyTagFilter);
    }
    let window = Window::last_days(reference, total_days)?;

    Ok(filter
        .include()
        .iter()
        .map(|tag| {
            let total: Money = entries
                .iter()
                .filter(|e| window.contains(e) && !filter.excludes(e) && e.has_label(tag))
                .map(|e| e.cost)
                .sum();
            (tag.clone(), total)
        })
        .collect())
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

    fn sample_entries() -> Vec<Entry> {
        let today = reference();
        vec![
            entry(1, "Coffee", 350, today - chrono::Duration::days(1), &[]),
            entry(
                2,
                "Rent",
                80000,
                today - chrono::Duration::days(5),
                &["housing"],
            ),
        ]
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!(SortKey::from_str("name").unwrap(), SortKey::Name);
        assert_eq!(SortKey::from_str("cost").unwrap(), SortKey::Cost);
        assert_eq!(SortKey::from_str("date").unwrap(), SortKey::Date);
        assert!(matches!(
            SortKey::from_str("amount"),
            Err(ExpenseError::UnknownSortKey(_))
        ));
    }

    #[test]
    fn test_list_view_unfiltered_totals_everything() {
        let entries = sample_entries();
        let window = Window::last_days(reference(), 30).unwrap();

        let listing = list_view(&entries, &window, &TagFilter::all(), SortKey::Date);
        assert_eq!(listing.entries.len(), 2);
        // Date ascending: Rent (older) before Coffee.
        assert_eq!(listing.entries[0].name, "Rent");
        assert_eq!(listing.entries[1].name, "Coffee");
        assert_eq!(listing.total, Money::from_cents(80350));
    }

    #[test]
    fn test_list_view_include_filter() {
        let entries = sample_entries();
        let window = Window::last_days(reference(), 30).unwrap();
        let filter = TagFilter::parse(["housing"]).unwrap();

        let listing = list_view(&entries, &window, &filter, SortKey::Date);
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].name, "Rent");
        assert_eq!(listing.total, Money::from_cents(80000));
    }

    #[test]
    fn test_list_view_window_cutoff() {
        let today = reference();
        let entries = vec![
            entry(1, "Old", 1000, today - chrono::Duration::days(40), &[]),
            entry(2, "New", 2000, today - chrono::Duration::days(3), &[]),
        ];
        let window = Window::last_days(today, 30).unwrap();

        let listing = list_view(&entries, &window, &TagFilter::all(), SortKey::Date);
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].name, "New");
    }

    #[test]
    fn test_list_view_sort_stability_on_equal_cost() {
        let today = reference();
        let entries = vec![
            entry(1, "First", 500, today - chrono::Duration::days(2), &[]),
            entry(2, "Second", 500, today - chrono::Duration::days(1), &[]),
            entry(3, "Cheap", 100, today, &[]),
        ];
        let window = Window::last_days(today, 30).unwrap();

        let listing = list_view(&entries, &window, &TagFilter::all(), SortKey::Cost);
        assert_eq!(listing.entries[0].name, "Cheap");
        // Equal costs keep snapshot order.
        assert_eq!(listing.entries[1].name, "First");
        assert_eq!(listing.entries[2].name, "Second");
    }

    #[test]
    fn test_list_view_sort_by_name() {
        let today = reference();
        let entries = vec![
            entry(1, "Zoo", 100, today, &[]),
            entry(2, "Apple", 200, today, &[]),
        ];
        let window = Window::last_days(today, 30).unwrap();

        let listing = list_view(&entries, &window, &TagFilter::all(), SortKey::Name);
        assert_eq!(listing.entries[0].name, "Apple");
        assert_eq!(listing.entries[1].name, "Zoo");
    }

    #[test]
    fn test_average_view_single_tag_example() {
        // One 800.00 entry dated five days back, window 30, total 32:
        // two offsets, both containing the entry.
        let today = reference();
        let entries = vec![entry(
            1,
            "Rent",
            80000,
            today - chrono::Duration::days(5),
            &["housing"],
        )];
        let filter = TagFilter::parse(["housing"]).unwrap();

        let series = average_view(&entries, &filter, today, Some(32), 30, 1, false).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "housing");
        assert_eq!(
            series[0].raw,
            vec![Money::from_cents(80000), Money::from_cents(80000)]
        );
        assert_eq!(series[0].fit.len(), 2);
        // A flat series fits to a flat polynomial.
        assert!((series[0].fit[0] - 800.0).abs() < 1e-6);
        assert!((series[0].fit[1] - 800.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_view_defaults_total_days_to_span() {
        let today = reference();
        let entries = vec![
            entry(1, "Old", 1000, today - chrono::Duration::days(40), &[]),
            entry(2, "New", 2000, today - chrono::Duration::days(1), &[]),
        ];

        // Span is 40 days, window 30: 10 offsets.
        let series =
            average_view(&entries, &TagFilter::all(), today, None, 30, 2, false).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, ALL_BUCKET);
        assert_eq!(series[0].raw.len(), 10);
    }

    #[test]
    fn test_average_view_too_small_span_rejected() {
        let today = reference();
        let entries = vec![entry(1, "New", 2000, today, &[])];

        let err = average_view(&entries, &TagFilter::all(), today, Some(30), 30, 1, false)
            .unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidWindow(_)));
    }

    #[test]
    fn test_average_view_degree_validated() {
        let today = reference();
        let entries = vec![entry(1, "Rent", 80000, today - chrono::Duration::days(5), &[])];

        // 2 offsets but degree 2 needs at least 3 points.
        let err = average_view(&entries, &TagFilter::all(), today, Some(32), 30, 2, false)
            .unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidFitDegree { .. }));
    }

    #[test]
    fn test_average_view_combine_sums_buckets() {
        let today = reference();
        let entries = vec![
            entry(1, "Rent", 80000, today - chrono::Duration::days(5), &["housing"]),
            entry(2, "Groceries", 5000, today - chrono::Duration::days(5), &["food"]),
        ];
        let filter = TagFilter::parse(["housing", "food"]).unwrap();

        let series = average_view(&entries, &filter, today, Some(32), 30, 1, true).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, ALL_BUCKET);
        assert_eq!(
            series[0].raw,
            vec![Money::from_cents(85000), Money::from_cents(85000)]
        );
    }

    #[test]
    fn test_compare_view_example() {
        let entries = sample_entries();
        let filter = TagFilter::parse(["housing", "food"]).unwrap();

        let totals = compare_view(&entries, &filter, reference(), 30).unwrap();
        assert_eq!(
            totals,
            vec![
                ("housing".to_string(), Money::from_cents(80000)),
                ("food".to_string(), Money::zero()),
            ]
        );
    }

    #[test]
    fn test_compare_view_requires_include_tags() {
        let entries = sample_entries();
        let err = compare_view(&entries, &TagFilter::all(), reference(), 30).unwrap_err();
        assert!(matches!(err, ExpenseError::EmptyTagFilter));

        // Exclude-only filters are also rejected.
        let filter = TagFilter::parse(["/junk"]).unwrap();
        let err = compare_view(&entries, &filter, reference(), 30).unwrap_err();
        assert!(matches!(err, ExpenseError::EmptyTagFilter));
    }

    #[test]
    fn test_compare_view_respects_excludes() {
        let today = reference();
        let entries = vec![
            entry(1, "Groceries", 5000, today, &["food"]),
            entry(2, "Dinner", 3000, today, &["food", "restaurant"]),
        ];
        let filter = TagFilter::parse(["food", "/restaurant"]).unwrap();

        let totals = compare_view(&entries, &filter, today, 30).unwrap();
        assert_eq!(totals, vec![("food".to_string(), Money::from_cents(5000))]);
    }

    #[test]
    fn test_compare_view_multi_count_across_buckets() {
        let today = reference();
        let entries = vec![entry(1, "Dinner", 3000, today, &["food", "social"])];
        let filter = TagFilter::parse(["food", "social"]).unwrap();

        let totals = compare_view(&entries, &filter, today, 30).unwrap();
        // The entry lands in both buckets; this is the intended per-tag
        // breakdown semantics.
        assert_eq!(
            totals,
            vec![
                ("food".to_string(), Money::from_cents(3000)),
                ("social".to_string(), Money::from_cents(3000)),
            ]
        );
    }
}
