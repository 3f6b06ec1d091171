//! CLI handlers for the query views
//!
//! List, average and compare commands. Each captures the reference day
//! once, builds a tag filter from the raw `-t` tokens, runs the engine and
//! prints the rendered result.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::display;
use crate::error::ExpenseResult;
use crate::query::{average_view, compare_view, list_view, SortKey, TagFilter, Window};
use crate::storage::EntryStore;

/// Handle `expenses list`
pub fn handle_list(
    store: &EntryStore,
    days: i64,
    tags: Vec<String>,
    sort: String,
    today: NaiveDate,
) -> ExpenseResult<()> {
    let filter = TagFilter::parse(tags)?;
    let window = Window::last_days(today, days)?;
    let sort = SortKey::from_str(&sort)?;

    let listing = list_view(store.entries(), &window, &filter, sort);
    print!("{}", display::format_listing(&listing));
    Ok(())
}

/// Handle `expenses average`
#[allow(clippy::too_many_arguments)]
pub fn handle_average(
    store: &EntryStore,
    days: Option<i64>,
    window_days: i64,
    degree: usize,
    tags: Vec<String>,
    combine: bool,
    today: NaiveDate,
) -> ExpenseResult<()> {
    let filter = TagFilter::parse(tags)?;

    let series = average_view(
        store.entries(),
        &filter,
        today,
        days,
        window_days,
        degree,
        combine,
    )?;
    print!("{}", display::format_trend_series(&series));
    Ok(())
}

/// Handle `expenses compare`
pub fn handle_compare(
    store: &EntryStore,
    days: i64,
    tags: Vec<String>,
    today: NaiveDate,
) -> ExpenseResult<()> {
    let filter = TagFilter::parse(tags)?;

    let totals = compare_view(store.entries(), &filter, today, days)?;
    print!("{}", display::format_comparison(&totals));
    Ok(())
}
