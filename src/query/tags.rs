//! Include/exclude tag filters
//!
//! Raw tag tokens use a leading `/` to mark a label as excluded, e.g.
//! `-t food /restaurant` keeps food expenses but drops restaurant visits.
//! The marker is a parsing convention only; inside the engine a filter is a
//! structured pair of include and exclude sets.

use std::collections::BTreeSet;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Entry;

/// A tag filter with an ordered include list and an exclude set
///
/// An empty include list means "no include constraint" (match-all), not
/// "match nothing". Exclusion always takes precedence: an entry carrying
/// both an included and an excluded label is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    include: Vec<String>,
    exclude: BTreeSet<String>,
}

impl TagFilter {
    /// An empty filter that accepts every entry
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from raw tokens, routing `/label` tokens into the
    /// exclude set
    ///
    /// A bare `/` is rejected as a malformed token rather than silently
    /// dropped. A label appearing both with and without the marker lands in
    /// both sets.
    pub fn parse<I, S>(tokens: I) -> ExpenseResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();

        for token in tokens {
            let token = token.as_ref();
            match token.strip_prefix('/') {
                Some("") => return Err(ExpenseError::MalformedTagToken),
                Some(label) => {
                    filter.exclude.insert(label.to_string());
                }
                None => {
                    if !filter.include.iter().any(|t| t == token) {
                        filter.include.push(token.to_string());
                    }
                }
            }
        }

        Ok(filter)
    }

    /// The include labels, in the order they were supplied
    pub fn include(&self) -> &[String] {
        &self.include
    }

    /// Whether any include constraint is configured
    pub fn has_includes(&self) -> bool {
        !self.include.is_empty()
    }

    /// Whether the entry carries any excluded label
    pub fn excludes(&self, entry: &Entry) -> bool {
        entry.has_any_label(self.exclude.iter())
    }

    /// Whether the entry passes the full filter
    ///
    /// The entry's effective label set (tags plus name) must intersect the
    /// include set when one is configured, and must not touch the exclude
    /// set.
    pub fn matches(&self, entry: &Entry) -> bool {
        if self.excludes(entry) {
            return false;
        }
        !self.has_includes() || entry.has_any_label(self.include.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, Money};
    use chrono::NaiveDate;

    fn entry(name: &str, tags: &[&str]) -> Entry {
        Entry::new(
            EntryId::from_raw(1),
            name,
            Money::from_cents(100),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TagFilter::all();
        assert!(filter.matches(&entry("Coffee", &[])));
        assert!(filter.matches(&entry("Rent", &["housing"])));
    }

    #[test]
    fn test_parse_routes_marker_into_exclude() {
        let filter = TagFilter::parse(["food", "/restaurant"]).unwrap();
        assert_eq!(filter.include(), ["food"]);
        assert!(filter.matches(&entry("Groceries", &["food"])));
        assert!(!filter.matches(&entry("Dinner", &["food", "restaurant"])));
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(matches!(
            TagFilter::parse(["food", "/"]),
            Err(ExpenseError::MalformedTagToken)
        ));
    }

    #[test]
    fn test_include_requires_intersection() {
        let filter = TagFilter::parse(["housing"]).unwrap();
        assert!(filter.matches(&entry("Rent", &["housing"])));
        assert!(!filter.matches(&entry("Coffee", &[])));
    }

    #[test]
    fn test_name_counts_as_label() {
        let filter = TagFilter::parse(["Rent"]).unwrap();
        assert!(filter.matches(&entry("Rent", &[])));
    }

    #[test]
    fn test_exclude_precedence() {
        // Same label in both sets: exclusion wins.
        let filter = TagFilter::parse(["housing", "/housing"]).unwrap();
        assert!(!filter.matches(&entry("Rent", &["housing"])));
        assert_eq!(filter.include(), ["housing"]);
    }

    #[test]
    fn test_exclude_only_filter() {
        let filter = TagFilter::parse(["/junk"]).unwrap();
        assert!(!filter.has_includes());
        assert!(filter.matches(&entry("Coffee", &[])));
        assert!(!filter.matches(&entry("Candy", &["junk"])));
    }

    #[test]
    fn test_tag_order_symmetry() {
        let filter = TagFilter::parse(["housing", "food"]).unwrap();
        let a = entry("Rent", &["housing", "food"]);
        let b = entry("Rent", &["food", "housing"]);
        assert_eq!(filter.matches(&a), filter.matches(&b));
    }

    #[test]
    fn test_include_order_preserved_and_deduplicated() {
        let filter = TagFilter::parse(["b", "a", "b"]).unwrap();
        assert_eq!(filter.include(), ["b", "a"]);
    }

    #[test]
    fn test_case_sensitive() {
        let filter = TagFilter::parse(["Housing"]).unwrap();
        assert!(!filter.matches(&entry("Rent", &["housing"])));
    }
}
