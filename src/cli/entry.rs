//! CLI handlers for store mutations
//!
//! Setup, add, delete (with interactive confirmation) and change commands.

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::config::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;
use crate::storage::{EntryChanges, EntryStore};

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!(
            "Incorrect date '{}', expected format YYYY-MM-DD",
            s
        ))
    })
}

/// Parse a cost argument
pub fn parse_cost(s: &str) -> ExpenseResult<Money> {
    Money::parse(s).map_err(|e| ExpenseError::Validation(e.to_string()))
}

/// Handle `expenses setup`
pub fn handle_setup(paths: ExpensePaths, overwrite: bool) -> ExpenseResult<()> {
    let file = paths.entries_file();
    let existed = file.exists();

    EntryStore::create(paths, overwrite)?;

    if existed && overwrite {
        println!("Database at {} has been overwritten.", file.display());
    } else {
        println!("Created database at {}.", file.display());
    }
    Ok(())
}

/// Handle `expenses add`
pub fn handle_add(
    store: &mut EntryStore,
    name: String,
    cost: String,
    date: Option<String>,
    tags: Vec<String>,
    today: NaiveDate,
) -> ExpenseResult<()> {
    let cost = parse_cost(&cost)?;
    let date = match date {
        Some(s) => parse_date(&s)?,
        None => today,
    };

    let entry = store.add(name, cost, date, tags)?;
    println!("Added entry {} ({}).", entry.id, entry.name);
    Ok(())
}

/// Handle `expenses delete`
///
/// Prompts for a y/n confirmation unless `yes` is set.
pub fn handle_delete(store: &mut EntryStore, id: u64, yes: bool) -> ExpenseResult<()> {
    // Fail on an unknown id before bothering the user with a prompt.
    if store.get(id).is_none() {
        return Err(ExpenseError::NotFound(id));
    }

    if !yes && !confirm(&format!("Do you really want to delete entry {}? (y/n) ", id))? {
        println!("Aborted.");
        return Ok(());
    }

    store.delete(id)?;
    println!("Deleted entry {}!", id);
    Ok(())
}

/// Handle `expenses change`
pub fn handle_change(
    store: &mut EntryStore,
    id: u64,
    name: Option<String>,
    cost: Option<String>,
    date: Option<String>,
    tags: Option<Vec<String>>,
) -> ExpenseResult<()> {
    let changes = EntryChanges {
        name,
        cost: cost.as_deref().map(parse_cost).transpose()?,
        date: date.as_deref().map(parse_date).transpose()?,
        tags,
    };

    let entry = store.change(id, changes)?;
    println!("Changed entry {} ({}).", entry.id, entry.name);
    Ok(())
}

/// Ask a y/n question on stdin until the answer is one of the two
fn confirm(prompt: &str) -> ExpenseResult<bool> {
    loop {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| ExpenseError::Io(e.to_string()))?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .map_err(|e| ExpenseError::Io(e.to_string()))?;

        match input.trim() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => continue,
        }
    }
}
